//! Transport-agnostic request surface over the household services.
//!
//! Each operation takes the caller's bearer credential explicitly, resolves
//! the current user, and returns wire-ready DTOs or an [`ApiError`]
//! carrying the `{detail}` error envelope.

mod dto;
mod error;
mod facade;

pub use dto::{
    CreateFamilyBody, CreateListBody, CreateTaskBody, FamilyPublic, InviteCodePublic,
    JoinFamilyBody, ListPublic, LoginBody, RegisterBody, SignupPublic, TaskPublic,
    TaskStatusBody, TokenPublic, UpdateListBody, UpdateTaskBody, UserPublic,
};
pub use error::{ApiError, ApiErrorKind, ErrorDetail, ErrorEnvelope, FieldError, GENERIC_MESSAGE};
pub use facade::{HouseholdApi, InMemoryHouseholdApi, PONG};
