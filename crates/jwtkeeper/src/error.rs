//! Errors for jwtkeeper

use crate::claims::TokenKind;
use thiserror::Error;

/// JWTkeeper Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    BadSignature,

    // ============================================================================
    // Token Errors
    // ============================================================================
    #[error("Token issuer mismatch: expected '{expected}', found '{found}'")]
    IssuerMismatch { expected: String, found: String },

    #[error("Token audience mismatch: expected '{expected}', found '{found}'")]
    AudienceMismatch { expected: String, found: String },

    #[error("Token not valid until {not_before} (now: {now})")]
    NotYetValid { not_before: i64, now: i64 },

    #[error("Token expired at {expired_at} (now: {now})")]
    Expired { expired_at: i64, now: i64 },

    #[error("Token '{token_id}' has been revoked")]
    Revoked { token_id: String },

    #[error("Token kind mismatch: expected {expected}, found {found}")]
    TokenKindMismatch { expected: TokenKind, found: TokenKind },

    // ============================================================================
    // Issuance Errors
    // ============================================================================
    #[error("Custom claim '{0}' collides with a reserved claim")]
    ReservedClaimCollision(String),

    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("The 'none' algorithm is rejected for security reasons (RFC 8725)")]
    AlgorithmNoneRejected,

    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),
}

/// Coarse classification of [`Error`] for callers that only branch on the
/// failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedToken,
    BadSignature,
    IssuerMismatch,
    AudienceMismatch,
    NotYetValid,
    Expired,
    Revoked,
    TokenKindMismatch,
    ReservedClaimCollision,
    TokenTooLarge,
    Configuration,
}

impl Error {
    /// The failure kind, without its context
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedToken(_) => ErrorKind::MalformedToken,
            Error::BadSignature => ErrorKind::BadSignature,
            Error::IssuerMismatch { .. } => ErrorKind::IssuerMismatch,
            Error::AudienceMismatch { .. } => ErrorKind::AudienceMismatch,
            Error::NotYetValid { .. } => ErrorKind::NotYetValid,
            Error::Expired { .. } => ErrorKind::Expired,
            Error::Revoked { .. } => ErrorKind::Revoked,
            Error::TokenKindMismatch { .. } => ErrorKind::TokenKindMismatch,
            Error::ReservedClaimCollision(_) => ErrorKind::ReservedClaimCollision,
            Error::TokenTooLarge { .. } => ErrorKind::TokenTooLarge,
            Error::AlgorithmUnsupported(_)
            | Error::AlgorithmNoneRejected
            | Error::ConfigurationInvalid(_) => ErrorKind::Configuration,
        }
    }

    /// Whether the error was raised while verifying a token
    pub fn is_verification_failure(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::ReservedClaimCollision | ErrorKind::TokenTooLarge | ErrorKind::Configuration
        )
    }
}

/// Result type alias for JWTkeeper operations
pub type Result<T> = std::result::Result<T, Error>;
