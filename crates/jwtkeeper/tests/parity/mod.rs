//! Parity harness between jwtkeeper and jsonwebtoken
//!
//! Both libraries receive byte-identical tokens and the same secret, issuer
//! and audience. Their results are mapped onto [`ValidationOutcome`] so the
//! tests can assert that they agree.
//!
//! jsonwebtoken checks the time window before issuer and audience, while
//! jwtkeeper checks issuer and audience first. Parity tests therefore only
//! ever break one property of a token at a time.

#![allow(dead_code)]

pub mod token_gen;
pub mod validators;

use std::fmt;

/// Normalized validation result for comparing library outcomes
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Success,
    InvalidSignature,
    InvalidFormat,
    InvalidIssuer,
    InvalidAudience,
    Expired,
    NotYetValid,
    Other(String),
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::InvalidSignature => write!(f, "InvalidSignature"),
            Self::InvalidFormat => write!(f, "InvalidFormat"),
            Self::InvalidIssuer => write!(f, "InvalidIssuer"),
            Self::InvalidAudience => write!(f, "InvalidAudience"),
            Self::Expired => write!(f, "Expired"),
            Self::NotYetValid => write!(f, "NotYetValid"),
            Self::Other(reason) => write!(f, "Other({reason})"),
        }
    }
}

/// Outcomes from both libraries for one token
#[derive(Debug)]
pub struct ParityResult {
    pub jwtkeeper_outcome: ValidationOutcome,
    pub jsonwebtoken_outcome: ValidationOutcome,
}

impl ParityResult {
    pub fn is_parity(&self) -> bool {
        self.jwtkeeper_outcome == self.jsonwebtoken_outcome
    }
}

/// Verify `token` with both validators
pub fn run_parity_test(
    token: &str,
    jwtkeeper: &validators::JwtkeeperValidator,
    jsonwebtoken: &validators::JsonwebtokenValidator,
) -> ParityResult {
    ParityResult {
        jwtkeeper_outcome: jwtkeeper.validate(token),
        jsonwebtoken_outcome: jsonwebtoken.validate(token),
    }
}

/// Assert that both validators reached the same outcome
pub fn assert_parity(result: &ParityResult) {
    assert!(
        result.is_parity(),
        "Parity test failed!\n  jwtkeeper: {}\n  jsonwebtoken: {}",
        result.jwtkeeper_outcome,
        result.jsonwebtoken_outcome
    );
}

/// Assert that both validators accepted the token
pub fn assert_both_succeed(result: &ParityResult) {
    assert!(
        result.jwtkeeper_outcome == ValidationOutcome::Success,
        "jwtkeeper validation failed: {}",
        result.jwtkeeper_outcome
    );
    assert!(
        result.jsonwebtoken_outcome == ValidationOutcome::Success,
        "jsonwebtoken validation failed: {}",
        result.jsonwebtoken_outcome
    );
}
