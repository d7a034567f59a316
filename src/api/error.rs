//! Error envelope and mapping from service errors.

use crate::board::{
    domain::BoardDomainError,
    services::{ListRegistryError, TaskEngineError},
};
use crate::family::{domain::FamilyDomainError, services::FamilyMembershipError};
use crate::identity::{domain::IdentityDomainError, services::AuthSessionError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Message shown to end users in place of field-level details.
pub const GENERIC_MESSAGE: &str = "Something went wrong";

/// Category of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// A field failed validation.
    Validation,
    /// The bearer credential is missing, invalid, or expired.
    Unauthenticated,
    /// Login email and password do not match.
    InvalidCredentials,
    /// A non-admin tried to assign a task to someone else.
    InsufficientPermissions,
    /// The resource exists but is outside the caller's visibility.
    Forbidden,
    /// The resource does not exist.
    NotFound,
    /// The request conflicts with existing state.
    Conflict,
    /// The invite code names no family.
    InvalidInviteCode,
    /// The caller already belongs to a family.
    AlreadyInFamily,
    /// The caller must belong to a family.
    NotInFamily,
    /// An unexpected server-side failure.
    Internal,
}

impl ApiErrorKind {
    /// Returns the conventional HTTP status code.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Validation => 422,
            Self::Unauthenticated => 401,
            Self::InvalidCredentials
            | Self::InvalidInviteCode
            | Self::AlreadyInFamily
            | Self::NotInFamily => 400,
            Self::InsufficientPermissions | Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path to the offending field, e.g. `["body", "email"]`.
    pub loc: Vec<String>,
    /// Human-readable message.
    pub msg: String,
    /// Machine-readable error type.
    #[serde(rename = "type")]
    pub error_type: String,
}

impl FieldError {
    fn body(field: &str, msg: String) -> Self {
        Self {
            loc: vec!["body".to_owned(), field.to_owned()],
            msg,
            error_type: "value_error".to_owned(),
        }
    }
}

/// Either a single message or a list of field errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// A message safe to show verbatim.
    Message(String),
    /// Field-level validation failures.
    Fields(Vec<FieldError>),
}

/// Wire form of an error: `{"detail": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The error detail.
    pub detail: ErrorDetail,
}

impl ErrorEnvelope {
    /// Returns the text to show an end user.
    ///
    /// Field-level details collapse to [`GENERIC_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> &str {
        match &self.detail {
            ErrorDetail::Message(message) => message,
            ErrorDetail::Fields(_) => GENERIC_MESSAGE,
        }
    }
}

/// A failed request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}", message = .envelope.user_message())]
pub struct ApiError {
    /// Error category.
    pub kind: ApiErrorKind,
    /// Wire envelope.
    pub envelope: ErrorEnvelope,
}

impl ApiError {
    /// Creates an error with a verbatim message.
    #[must_use]
    pub fn message(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            envelope: ErrorEnvelope {
                detail: ErrorDetail::Message(message.into()),
            },
        }
    }

    /// Creates a validation error for one body field.
    #[must_use]
    pub fn field(field: &str, msg: impl ToString) -> Self {
        Self {
            kind: ApiErrorKind::Validation,
            envelope: ErrorEnvelope {
                detail: ErrorDetail::Fields(vec![FieldError::body(field, msg.to_string())]),
            },
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    fn internal(err: &dyn std::error::Error) -> Self {
        error!(error = %err, "request failed");
        Self::message(ApiErrorKind::Internal, "Internal server error")
    }

    fn verbatim(kind: ApiErrorKind, err: &dyn std::error::Error) -> Self {
        Self::message(kind, err.to_string())
    }
}

impl From<IdentityDomainError> for ApiError {
    fn from(err: IdentityDomainError) -> Self {
        match err {
            IdentityDomainError::InvalidEmail(_) | IdentityDomainError::EmailTooLong => {
                Self::field("email", err)
            }
            IdentityDomainError::DisplayNameTooLong => Self::field("name", err),
            IdentityDomainError::InvalidPasswordLength { .. } => Self::field("password", err),
            IdentityDomainError::EmptyPasswordHash => Self::internal(&err),
        }
    }
}

impl From<FamilyDomainError> for ApiError {
    fn from(err: FamilyDomainError) -> Self {
        match err {
            FamilyDomainError::EmptyFamilyName | FamilyDomainError::FamilyNameTooLong => {
                Self::field("name", err)
            }
            FamilyDomainError::InvalidInviteCode(_) => Self::field("invite_code", err),
            FamilyDomainError::UnsupportedInviteCodeLength(_) => Self::internal(&err),
        }
    }
}

impl From<BoardDomainError> for ApiError {
    fn from(err: BoardDomainError) -> Self {
        let field = match err {
            BoardDomainError::EmptyListName | BoardDomainError::ListNameTooLong => "name",
            BoardDomainError::InvalidColor(_) => "color",
            BoardDomainError::EmptyTaskTitle | BoardDomainError::TaskTitleTooLong => "title",
        };
        Self::field(field, err)
    }
}

impl From<AuthSessionError> for ApiError {
    fn from(err: AuthSessionError) -> Self {
        match err {
            AuthSessionError::Domain(domain) => domain.into(),
            AuthSessionError::EmailAlreadyRegistered(_) => {
                Self::verbatim(ApiErrorKind::Conflict, &err)
            }
            AuthSessionError::InvalidCredentials => {
                Self::verbatim(ApiErrorKind::InvalidCredentials, &err)
            }
            AuthSessionError::Unauthenticated => {
                Self::verbatim(ApiErrorKind::Unauthenticated, &err)
            }
            AuthSessionError::Repository(_)
            | AuthSessionError::Hasher(_)
            | AuthSessionError::Token(_) => Self::internal(&err),
        }
    }
}

impl From<FamilyMembershipError> for ApiError {
    fn from(err: FamilyMembershipError) -> Self {
        match err {
            FamilyMembershipError::Domain(domain) => domain.into(),
            FamilyMembershipError::AlreadyInFamily => {
                Self::verbatim(ApiErrorKind::AlreadyInFamily, &err)
            }
            FamilyMembershipError::InvalidInviteCode => {
                Self::verbatim(ApiErrorKind::InvalidInviteCode, &err)
            }
            FamilyMembershipError::NotInFamily => Self::verbatim(ApiErrorKind::NotInFamily, &err),
            FamilyMembershipError::Forbidden => Self::verbatim(ApiErrorKind::Forbidden, &err),
            FamilyMembershipError::FamilyNotFound(_) => {
                Self::verbatim(ApiErrorKind::NotFound, &err)
            }
            FamilyMembershipError::Repository(_)
            | FamilyMembershipError::Users(_)
            | FamilyMembershipError::InviteCodeSpaceExhausted { .. } => Self::internal(&err),
        }
    }
}

impl From<ListRegistryError> for ApiError {
    fn from(err: ListRegistryError) -> Self {
        match err {
            ListRegistryError::Domain(domain) => domain.into(),
            ListRegistryError::NotInFamily => Self::verbatim(ApiErrorKind::NotInFamily, &err),
            ListRegistryError::NotFound(_) => Self::verbatim(ApiErrorKind::NotFound, &err),
            ListRegistryError::Forbidden(_) => Self::verbatim(ApiErrorKind::Forbidden, &err),
            ListRegistryError::Repository(_) | ListRegistryError::Families(_) => {
                Self::internal(&err)
            }
        }
    }
}

impl From<TaskEngineError> for ApiError {
    fn from(err: TaskEngineError) -> Self {
        match err {
            TaskEngineError::Domain(domain) => domain.into(),
            TaskEngineError::InsufficientPermissions => {
                Self::verbatim(ApiErrorKind::InsufficientPermissions, &err)
            }
            TaskEngineError::AssigneeOutOfScope(_) => Self::field("user_id", err),
            TaskEngineError::ListNotFound(_) | TaskEngineError::TaskNotFound(_) => {
                Self::verbatim(ApiErrorKind::NotFound, &err)
            }
            TaskEngineError::Forbidden(_) => Self::verbatim(ApiErrorKind::Forbidden, &err),
            TaskEngineError::Repository(_) | TaskEngineError::Families(_) => Self::internal(&err),
        }
    }
}
