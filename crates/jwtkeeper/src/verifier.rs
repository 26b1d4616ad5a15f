//! Token verification
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. structure (three Base64URL segments, header JSON)
//! 2. algorithm and signature
//! 3. issuer
//! 4. audience
//! 5. not-before, and issued-at not in the future
//! 6. expiry
//! 7. revocation
//!
//! The signature is checked over the raw `header.payload` text before the
//! payload is decoded, so any change to the payload segment surfaces as a
//! bad signature rather than a parse error.

use crate::claims::{ClaimSet, ReservedClaims, TokenKind};
use crate::config::SigningConfig;
use crate::error::{Error, Result};
use crate::header::TokenHeader;
use crate::limits::{
    MAX_ALG_LENGTH, MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_SIGNATURE_B64_SIZE,
    MAX_TOKEN_LENGTH,
};
use crate::utils::base64url;
use crate::utils::bounds::{apply_leeway, validate_field_size};
use miniserde::json::{self, Object};
use std::sync::Arc;

/// Token split into its segments, header decoded
struct TokenParts<'a> {
    header: TokenHeader,
    signing_input: &'a str,
    payload_b64: &'a str,
    signature_b64: &'a str,
}

/// Verifies tokens issued under a [`SigningConfig`]
#[derive(Clone)]
pub struct Verifier {
    config: Arc<SigningConfig>,
}

impl Verifier {
    pub fn new(config: Arc<SigningConfig>) -> Self {
        Self { config }
    }

    /// Verify `token` for `audience`
    ///
    /// Returns every claim of the token, reserved and custom, or the first
    /// check that failed.
    pub fn verify(&self, audience: &str, token: &str) -> Result<ClaimSet> {
        let result = self.run_checks(audience, token);
        match &result {
            Ok(claims) => tracing::debug!(
                token_id = %claims.token_id(),
                kind = %claims.token_kind(),
                "token verified"
            ),
            Err(error) => tracing::debug!(kind = ?error.kind(), %error, "token rejected"),
        }
        result
    }

    /// Verify `token` for `audience` and require it to be of `kind`
    pub fn verify_kind(&self, audience: &str, token: &str, kind: TokenKind) -> Result<ClaimSet> {
        let claims = self.verify(audience, token)?;
        if claims.token_kind() != kind {
            tracing::debug!(expected = %kind, found = %claims.token_kind(), "token kind mismatch");
            return Err(Error::TokenKindMismatch {
                expected: kind,
                found: claims.token_kind(),
            });
        }
        Ok(claims)
    }

    fn run_checks(&self, audience: &str, token: &str) -> Result<ClaimSet> {
        // 1. Structure
        let parts = Self::split_token(token)?;

        // 2. Algorithm and signature
        let algorithm = self.config.algorithm();
        if parts.header.algorithm != algorithm.as_str() {
            tracing::debug!(
                found = %parts.header.algorithm,
                expected = %algorithm,
                "token algorithm does not match configuration"
            );
            return Err(Error::BadSignature);
        }
        algorithm.verify_signature(
            parts.signing_input,
            parts.signature_b64,
            self.config.secret(),
        )?;

        let payload_json = base64url::decode_string(parts.payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;
        let payload: Object = json::from_str(&payload_json)
            .map_err(|e| Error::MalformedToken(format!("payload is not a JSON object: {e}")))?;
        let reserved = ReservedClaims::from_object(&payload)?;

        // 3. Issuer
        if reserved.issuer != self.config.issuer() {
            return Err(Error::IssuerMismatch {
                expected: self.config.issuer().to_string(),
                found: reserved.issuer,
            });
        }

        // 4. Audience
        if reserved.audience != audience {
            return Err(Error::AudienceMismatch {
                expected: audience.to_string(),
                found: reserved.audience,
            });
        }

        let now = self.config.now();
        let leeway = self.config.leeway();

        // 5. Not before
        if now < apply_leeway(reserved.not_before, leeway, false) {
            return Err(Error::NotYetValid {
                not_before: reserved.not_before,
                now,
            });
        }
        if now < apply_leeway(reserved.issued_at, leeway, false) {
            return Err(Error::NotYetValid {
                not_before: reserved.issued_at,
                now,
            });
        }

        // 6. Expiry
        if now >= apply_leeway(reserved.expires_at, leeway, true) {
            return Err(Error::Expired {
                expired_at: reserved.expires_at,
                now,
            });
        }

        // 7. Revocation, consulted on every call
        if self.config.revocations().contains(&reserved.token_id) {
            return Err(Error::Revoked {
                token_id: reserved.token_id,
            });
        }

        Ok(ClaimSet::new(reserved, payload))
    }

    /// Split a compact token into its segments and decode the header
    fn split_token(token: &str) -> Result<TokenParts<'_>> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::MalformedToken(format!(
                "token too large: {} bytes (maximum: {MAX_TOKEN_LENGTH} bytes)",
                token.len()
            )));
        }

        let mut parts = token.split('.');
        let header_b64 = parts.next().ok_or_else(format_error)?;
        let payload_b64 = parts.next().ok_or_else(format_error)?;
        let signature_b64 = parts.next().ok_or_else(format_error)?;
        if parts.next().is_some() {
            return Err(format_error());
        }
        // An empty signature is structurally valid (unsecured JWS) and is
        // rejected by the signature check
        if header_b64.is_empty() || payload_b64.is_empty() {
            return Err(format_error());
        }

        // Signature length is bounded before anything touches the key
        if signature_b64.len() > MAX_SIGNATURE_B64_SIZE {
            return Err(Error::MalformedToken(format!(
                "signature too large: {} bytes (maximum: {MAX_SIGNATURE_B64_SIZE} bytes)",
                signature_b64.len()
            )));
        }

        let header_json = base64url::decode_string(header_b64, MAX_DECODED_HEADER_SIZE)?;
        let header: TokenHeader = json::from_str(&header_json)
            .map_err(|e| Error::MalformedToken(format!("Failed to parse header: {e}")))?;
        validate_field_size("alg", &header.algorithm, MAX_ALG_LENGTH)?;

        let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];

        Ok(TokenParts {
            header,
            signing_input,
            payload_b64,
            signature_b64,
        })
    }
}

fn format_error() -> Error {
    Error::MalformedToken("expected three parts separated by '.'".into())
}
