//! Validator wrappers that normalize results from jwtkeeper and jsonwebtoken
//!
//! # Error Normalization
//!
//! | Category | jwtkeeper Error | jsonwebtoken Error |
//! |----------|-----------------|--------------------|
//! | `InvalidSignature` | `BadSignature` | `InvalidSignature`, `InvalidAlgorithm` |
//! | `InvalidFormat` | `MalformedToken` | `InvalidToken`, `Base64`, `Json`, `Utf8` |
//! | `InvalidIssuer` | `IssuerMismatch` | `InvalidIssuer` |
//! | `InvalidAudience` | `AudienceMismatch` | `InvalidAudience` |
//! | `Expired` | `Expired` | `ExpiredSignature` |
//! | `NotYetValid` | `NotYetValid` | `ImmatureSignature` |

#![allow(dead_code)]

use super::ValidationOutcome;
use super::token_gen::WireClaims;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use jwtkeeper::{Error, SigningConfig, TokenAuthority};

/// Wrapper for a jwtkeeper authority verifying for one audience
pub struct JwtkeeperValidator {
    authority: TokenAuthority,
    audience: String,
}

impl JwtkeeperValidator {
    pub fn new(authority: TokenAuthority, audience: &str) -> Self {
        Self {
            authority,
            audience: audience.to_string(),
        }
    }

    pub fn authority(&self) -> &TokenAuthority {
        &self.authority
    }

    fn map_error(error: Error) -> ValidationOutcome {
        match error {
            Error::BadSignature => ValidationOutcome::InvalidSignature,
            Error::MalformedToken(_) => ValidationOutcome::InvalidFormat,
            Error::IssuerMismatch { .. } => ValidationOutcome::InvalidIssuer,
            Error::AudienceMismatch { .. } => ValidationOutcome::InvalidAudience,
            Error::Expired { .. } => ValidationOutcome::Expired,
            Error::NotYetValid { .. } => ValidationOutcome::NotYetValid,
            other => ValidationOutcome::Other(other.to_string()),
        }
    }

    pub fn validate(&self, token: &str) -> ValidationOutcome {
        match self.authority.verify(&self.audience, token) {
            Ok(_) => ValidationOutcome::Success,
            Err(e) => Self::map_error(e),
        }
    }
}

/// Wrapper for jsonwebtoken decoding with the equivalent validation rules
pub struct JsonwebtokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JsonwebtokenValidator {
    pub fn new(secret: &str, algorithm: Algorithm, issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud"]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Decode and return the claims
    pub fn decode(&self, token: &str) -> jsonwebtoken::errors::Result<WireClaims> {
        decode::<WireClaims>(token, &self.key, &self.validation).map(|data| data.claims)
    }

    fn map_error(error: &jsonwebtoken::errors::Error) -> ValidationOutcome {
        match error.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                ValidationOutcome::InvalidSignature
            }
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => ValidationOutcome::InvalidFormat,
            ErrorKind::InvalidIssuer => ValidationOutcome::InvalidIssuer,
            ErrorKind::InvalidAudience => ValidationOutcome::InvalidAudience,
            ErrorKind::ExpiredSignature => ValidationOutcome::Expired,
            ErrorKind::ImmatureSignature => ValidationOutcome::NotYetValid,
            other => ValidationOutcome::Other(format!("{other:?}")),
        }
    }

    pub fn validate(&self, token: &str) -> ValidationOutcome {
        match self.decode(token) {
            Ok(_) => ValidationOutcome::Success,
            Err(e) => Self::map_error(&e),
        }
    }
}

/// A jwtkeeper validator on the system clock
pub fn create_jwtkeeper_validator(secret: &str, issuer: &str, audience: &str) -> JwtkeeperValidator {
    let config = SigningConfig::builder(secret)
        .issuer(issuer)
        .build()
        .expect("valid configuration");
    JwtkeeperValidator::new(TokenAuthority::new(config), audience)
}
