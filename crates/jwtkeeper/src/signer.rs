//! Token issuance
//!
//! The signer turns reserved claims (plus, for access tokens, caller claims)
//! into a compact JWS string: `base64url(header).base64url(payload).base64url(sig)`.

use crate::claims::{ClaimBuilder, TokenKind, is_reserved};
use crate::config::{ClaimCollisionPolicy, SigningConfig};
use crate::error::{Error, Result};
use crate::header::TokenHeader;
use crate::limits::MAX_TOKEN_LENGTH;
use crate::utils::base64url;
use miniserde::json::{self, Object, Value};
use std::sync::Arc;

/// Issues signed access and refresh tokens
#[derive(Clone)]
pub struct Signer {
    config: Arc<SigningConfig>,
    claims: ClaimBuilder,
}

impl Signer {
    pub fn new(config: Arc<SigningConfig>) -> Self {
        Self {
            claims: ClaimBuilder::new(Arc::clone(&config)),
            config,
        }
    }

    /// Issue an access token for `audience` carrying `custom_claims`
    ///
    /// Reserved claims are written first and custom claims merged on top, so
    /// under [`ClaimCollisionPolicy::Override`] a custom claim named like a
    /// reserved one replaces it. Under [`ClaimCollisionPolicy::Reject`] such a
    /// claim fails the issuance instead.
    ///
    /// Fails with [`Error::TokenTooLarge`] when the encoded token would exceed
    /// the size the verifier accepts.
    pub fn issue_access(&self, audience: &str, mut custom_claims: Object) -> Result<String> {
        let reserved = self.claims.build(TokenKind::Access, audience);
        let mut payload = reserved.to_object();

        for (name, value) in std::mem::take(&mut *custom_claims) {
            if is_reserved(&name) {
                match self.config.collision_policy() {
                    ClaimCollisionPolicy::Reject => {
                        return Err(Error::ReservedClaimCollision(name));
                    }
                    ClaimCollisionPolicy::Override => {
                        tracing::warn!(
                            claim = %name,
                            token_id = %reserved.token_id,
                            "custom claim overrides reserved claim"
                        );
                    }
                }
            }
            payload.insert(name, value);
        }

        tracing::debug!(
            kind = %TokenKind::Access,
            token_id = %reserved.token_id,
            audience = %audience,
            expires_at = reserved.expires_at,
            "issued token"
        );
        self.encode(&payload)
    }

    /// Issue a refresh token for `audience`
    ///
    /// Refresh tokens carry only the reserved claims. Only an oversized
    /// audience can make issuance fail, with [`Error::TokenTooLarge`].
    pub fn issue_refresh(&self, audience: &str) -> Result<String> {
        let reserved = self.claims.build(TokenKind::Refresh, audience);

        tracing::debug!(
            kind = %TokenKind::Refresh,
            token_id = %reserved.token_id,
            audience = %audience,
            expires_at = reserved.expires_at,
            "issued token"
        );
        self.encode(&reserved.to_object())
    }

    /// Serialize and sign a claim map
    fn encode(&self, payload: &Object) -> Result<String> {
        let algorithm = self.config.algorithm();
        let header = TokenHeader::for_algorithm(algorithm);

        let header_b64 = base64url::encode(&json::to_string(&header));
        let payload_b64 = base64url::encode(&json::to_string(payload));
        let signing_input = format!("{header_b64}.{payload_b64}");
        let signature_b64 = algorithm.sign(&signing_input, self.config.secret());

        let token = format!("{signing_input}.{signature_b64}");
        if token.len() > MAX_TOKEN_LENGTH {
            tracing::debug!(size = token.len(), "refusing to issue oversized token");
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }
        Ok(token)
    }
}
