//! # Error Types
//!
//! Error handling for the control client.
//!
//! ## Error Categories
//! - **Transport errors**: connection, call dispatch, and reply-read
//!   failures reported by the bus
//! - **Protocol errors**: replies shorter than the command's declared
//!   argument count, requests built with the wrong arity
//! - **Configuration errors**: unreadable or invalid overrides
//!
//! Daemon-reported errors are not errors at this layer: they arrive as a
//! [`ResponseCode`] and carry their own exit codes.
//!
//! [`ResponseCode`]: crate::protocol::response::ResponseCode

use thiserror::Error;

use crate::protocol::response::ResponseCode;

/// Primary error type for all client operations.
#[derive(Error, Debug)]
pub enum ControlError {
    #[error("failed to connect to the system bus: {0}")]
    Connect(#[source] zbus::Error),

    #[error("failed to post bus message: {0}")]
    Call(#[source] zbus::Error),

    #[error("failed to read response: {0}")]
    Reply(#[source] zbus::Error),

    #[error("command returned insufficient response args (expected {expected}, got {got})")]
    MalformedResponse { expected: usize, got: usize },

    #[error("{command} takes {expected} argument bytes, got {got}")]
    ArityMismatch {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl ControlError {
    /// Process exit code for a client-side failure.
    ///
    /// Bus and malformed-response failures report as the daemon's
    /// internal-error code; request misuse reports as invalid-request.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Connect(_) | Self::Call(_) | Self::Reply(_) | Self::MalformedResponse { .. } => {
                ResponseCode::InternalError.exit_code()
            }
            Self::ArityMismatch { .. } | Self::Config(_) => {
                ResponseCode::InvalidRequest.exit_code()
            }
        }
    }
}

/// Type alias for Results using ControlError
pub type Result<T> = std::result::Result<T, ControlError>;
