//! Token generation through jsonwebtoken
//!
//! Produces tokens carrying the reserved claim layout jwtkeeper expects, so
//! jwtkeeper can be checked against tokens it did not sign itself.

#![allow(dead_code)]

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Reserved claims in their wire layout, plus arbitrary extras
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireClaims {
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub iss: String,
    pub aud: String,
    pub token_type: String,
    pub token_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before epoch")
        .as_secs() as i64
}

/// Fluent builder for tokens signed by jsonwebtoken
pub struct TokenBuilder {
    secret: Vec<u8>,
    algorithm: Algorithm,
    claims: WireClaims,
}

impl TokenBuilder {
    /// An access token valid for the next 15 minutes
    pub fn new(secret: &str, issuer: &str, audience: &str) -> Self {
        let now = unix_now();
        Self {
            secret: secret.as_bytes().to_vec(),
            algorithm: Algorithm::HS256,
            claims: WireClaims {
                exp: now + 900,
                iat: now,
                nbf: now,
                iss: issuer.to_string(),
                aud: audience.to_string(),
                token_type: "access_token".to_string(),
                token_id: format!("jsonwebtoken-{now}"),
                extra: Map::new(),
            },
        }
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn token_type(mut self, token_type: &str) -> Self {
        self.claims.token_type = token_type.to_string();
        self
    }

    /// Shift the validity window by `seconds`
    pub fn shift(mut self, seconds: i64) -> Self {
        self.claims.exp += seconds;
        self.claims.iat += seconds;
        self.claims.nbf += seconds;
        self
    }

    pub fn custom_claim(mut self, name: &str, value: Value) -> Self {
        self.claims.extra.insert(name.to_string(), value);
        self
    }

    pub fn generate(&self) -> String {
        encode(
            &Header::new(self.algorithm),
            &self.claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .expect("jsonwebtoken failed to encode")
    }
}

/// Replace the first signature character, keeping the token well-formed
pub fn corrupt_signature(token: &str) -> String {
    let (head, signature) = token.rsplit_once('.').expect("token has no signature");
    let mut signature = signature.to_string();
    let replacement = if signature.starts_with('A') { "B" } else { "A" };
    signature.replace_range(0..1, replacement);
    format!("{head}.{signature}")
}
