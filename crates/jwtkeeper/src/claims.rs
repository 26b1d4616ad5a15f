//! Reserved claims and claim construction
//!
//! This module defines the canonical claim set embedded in every token, the
//! [`ClaimBuilder`] that assembles it at issuance, and the [`ClaimSet`]
//! returned by a successful verification.

use crate::config::SigningConfig;
use crate::error::{Error, Result};
use crate::utils::bounds::validate_timestamp_bounds;
use miniserde::json::{Number, Object, Value};
use std::sync::Arc;

/// Wire names of the reserved claims, in the order they are written
pub const RESERVED_CLAIMS: [&str; 7] = ["exp", "iat", "nbf", "iss", "aud", "token_type", "token_id"];

/// Whether `name` is one of the reserved claim names
pub fn is_reserved(name: &str) -> bool {
    RESERVED_CLAIMS.contains(&name)
}

/// Kind of credential a token represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    /// Value of the `token_type` claim
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access_token",
            TokenKind::Refresh => "refresh_token",
        }
    }

    /// Parse a `token_type` claim value
    pub fn from_claim(value: &str) -> Option<Self> {
        match value {
            "access_token" => Some(TokenKind::Access),
            "refresh_token" => Some(TokenKind::Refresh),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The canonical claim set embedded in every token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedClaims {
    /// Expiration Time (exp), Unix seconds
    pub expires_at: i64,
    /// Issued At (iat), Unix seconds
    pub issued_at: i64,
    /// Not Before (nbf), Unix seconds; equal to `issued_at` at issuance
    pub not_before: i64,
    /// Issuer (iss)
    pub issuer: String,
    /// Audience (aud)
    pub audience: String,
    /// Token kind (token_type)
    pub token_kind: TokenKind,
    /// Unique token identifier (token_id)
    pub token_id: String,
}

impl ReservedClaims {
    /// Serialize into a flat claim map using the wire names
    pub fn to_object(&self) -> Object {
        let mut object = Object::new();
        object.insert("exp".to_string(), timestamp_value(self.expires_at));
        object.insert("iat".to_string(), timestamp_value(self.issued_at));
        object.insert("nbf".to_string(), timestamp_value(self.not_before));
        object.insert("iss".to_string(), Value::String(self.issuer.clone()));
        object.insert("aud".to_string(), Value::String(self.audience.clone()));
        object.insert(
            "token_type".to_string(),
            Value::String(self.token_kind.as_str().to_string()),
        );
        object.insert("token_id".to_string(), Value::String(self.token_id.clone()));
        object
    }

    /// Extract the reserved claims from a decoded payload
    ///
    /// Every reserved claim must be present with the right JSON type.
    pub fn from_object(object: &Object) -> Result<Self> {
        let expires_at = timestamp_claim(object, "exp")?;
        let issued_at = timestamp_claim(object, "iat")?;
        let not_before = timestamp_claim(object, "nbf")?;
        let issuer = string_claim(object, "iss")?.to_string();
        let audience = string_claim(object, "aud")?.to_string();
        let token_type = string_claim(object, "token_type")?;
        let token_kind = TokenKind::from_claim(token_type).ok_or_else(|| {
            Error::MalformedToken(format!("unknown token_type '{token_type}'"))
        })?;
        let token_id = string_claim(object, "token_id")?.to_string();

        Ok(Self {
            expires_at,
            issued_at,
            not_before,
            issuer,
            audience,
            token_kind,
            token_id,
        })
    }
}

fn timestamp_value(value: i64) -> Value {
    match u64::try_from(value) {
        Ok(unsigned) => Value::Number(Number::U64(unsigned)),
        Err(_) => Value::Number(Number::I64(value)),
    }
}

fn claim<'a>(object: &'a Object, name: &str) -> Result<&'a Value> {
    object
        .get(name)
        .ok_or_else(|| Error::MalformedToken(format!("missing claim '{name}'")))
}

fn string_claim<'a>(object: &'a Object, name: &str) -> Result<&'a str> {
    match claim(object, name)? {
        Value::String(s) => Ok(s),
        _ => Err(Error::MalformedToken(format!(
            "claim '{name}' must be a string"
        ))),
    }
}

fn timestamp_claim(object: &Object, name: &str) -> Result<i64> {
    let value = match claim(object, name)? {
        Value::Number(Number::U64(n)) => i64::try_from(*n).map_err(|_| {
            Error::MalformedToken(format!("claim '{name}' out of range: {n}"))
        })?,
        Value::Number(Number::I64(n)) => *n,
        _ => {
            return Err(Error::MalformedToken(format!(
                "claim '{name}' must be an integer"
            )));
        }
    };
    validate_timestamp_bounds(name, value)?;
    Ok(value)
}

/// Assembles the reserved claims for a new token
#[derive(Clone)]
pub struct ClaimBuilder {
    config: Arc<SigningConfig>,
}

impl ClaimBuilder {
    pub fn new(config: Arc<SigningConfig>) -> Self {
        Self { config }
    }

    /// Build the reserved claims for a token of `kind` intended for `audience`
    ///
    /// Reads the clock once, so `issued_at == not_before`, and draws one fresh
    /// token identifier.
    pub fn build(&self, kind: TokenKind, audience: &str) -> ReservedClaims {
        let now = self.config.now();
        let lifetime = i64::try_from(self.config.lifetime(kind)).unwrap_or(i64::MAX);

        ReservedClaims {
            expires_at: now.saturating_add(lifetime),
            issued_at: now,
            not_before: now,
            issuer: self.config.issuer().to_string(),
            audience: audience.to_string(),
            token_kind: kind,
            token_id: self.config.next_token_id(),
        }
    }
}

/// Claims of a successfully verified token
#[derive(Debug, Clone)]
pub struct ClaimSet {
    reserved: ReservedClaims,
    claims: Object,
}

impl ClaimSet {
    pub(crate) fn new(reserved: ReservedClaims, claims: Object) -> Self {
        Self { reserved, claims }
    }

    /// The typed reserved claims
    pub fn reserved(&self) -> &ReservedClaims {
        &self.reserved
    }

    pub fn token_id(&self) -> &str {
        &self.reserved.token_id
    }

    pub fn token_kind(&self) -> TokenKind {
        self.reserved.token_kind
    }

    /// Look up any claim, reserved or custom, by wire name
    ///
    /// Values are as parsed from the payload JSON, not as passed at issuance.
    /// A non-negative integer always comes back as [`Number::U64`], even if
    /// it was issued as [`Number::I64`], so match on the numeric value rather
    /// than the variant.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Custom claims only
    pub fn custom(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.claims.iter().filter(|(name, _)| !is_reserved(name))
    }

    /// The full claim map (reserved + custom)
    pub fn claims(&self) -> &Object {
        &self.claims
    }

    pub fn into_object(self) -> Object {
        self.claims
    }
}
