//! Error types for the Arona dashboard client.
//!
//! A single error type with explicit variants for transport, authentication,
//! protocol, input validation, decode and storage failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for dashboard operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (missing, expired or rejected credentials).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-success responses from the backend.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Client-side input validation errors.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Payloads that could not be decoded into the expected schema.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Durable token storage failures.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Returns true if the backend rejected the presented credentials.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::Auth(_) => true,
            Error::Protocol(e) => e.is_auth_error(),
            _ => false,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The HTTP client could not be constructed.
    #[error("client setup failed: {message}")]
    Setup { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the credential.
    #[error("token rejected")]
    TokenRejected,
}

/// A non-success HTTP response.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server, if it sent one.
    pub message: Option<String>,
    /// Raw response body, if any.
    pub body: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>, body: Option<String>) -> Self {
        Self {
            status,
            message,
            body,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Repository link does not look like a URL.
    #[error("invalid link '{value}': please enter a valid URL")]
    Link { value: String },

    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },
}

/// Decode errors for tokens and response bodies.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Token has no decodable payload segment.
    #[error("malformed token: {reason}")]
    Token { reason: String },

    /// Payload did not match the expected schema.
    #[error("invalid {what}: {reason}")]
    Schema { what: &'static str, reason: String },
}

/// Token storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem I/O failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Stored data could not be parsed.
    #[error("corrupt storage at {path}: {message}")]
    Corrupt { path: String, message: String },
}
