//! Error types for the session gate.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect password")]
    BadCredentials,

    #[error("Not logged in")]
    Missing,

    #[error("Session token is malformed")]
    Malformed,

    #[error("Session expired, please log in again")]
    Expired,

    #[error("Session was logged out")]
    Revoked,
}

