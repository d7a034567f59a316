//! Application services for registration and session resolution.

mod session;

pub use session::{
    AuthSessionError, AuthSessionResult, AuthSessionService, LoginRequest, RegisterUserRequest,
    Registration,
};
