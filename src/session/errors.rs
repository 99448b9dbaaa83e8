use super::storage::StorageError;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

pub const GENERIC_LOGIN_ERROR: &str = "Invalid email or password";
pub const GENERIC_SIGNUP_ERROR: &str = "Registration failed. Please try again.";
pub const CONNECTIVITY_MESSAGE: &str = "Unable to reach the server. Please try again.";

/// Problems caught locally, before any request is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {} characters long", MIN_PASSWORD_LEN)]
    PasswordTooShort,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("{0} is required")]
    Required(&'static str),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Credentials rejected by the gateway.
    #[error("{0}")]
    Authentication(String),

    /// Signup rejected by the gateway.
    #[error("{0}")]
    Registration(String),

    /// Transport failure or an unreadable reply. The detail is for logs only.
    #[error("{}", CONNECTIVITY_MESSAGE)]
    Connectivity(String),

    #[error("A request is already in progress")]
    Busy,

    #[error("Failed to persist session: {0}")]
    Storage(#[from] StorageError),
}
