//! Issue and verify tokens under one configuration

use crate::claims::{ClaimSet, TokenKind};
use crate::config::SigningConfig;
use crate::error::Result;
use crate::signer::Signer;
use crate::verifier::Verifier;
use miniserde::json::Object;
use std::sync::Arc;

/// Issues and verifies access and refresh tokens
///
/// The authority owns a [`Signer`] and a [`Verifier`] that share one
/// immutable [`SigningConfig`]. Cloning is cheap and every clone can be used
/// from any thread.
///
/// # Example
///
/// ```
/// use jwtkeeper::{Object, SigningConfig, TokenAuthority};
///
/// let config = SigningConfig::builder("my-secret").build()?;
/// let authority = TokenAuthority::new(config);
///
/// let token = authority.issue_access("billing", Object::new())?;
/// let claims = authority.verify_access("billing", &token)?;
/// assert_eq!(claims.reserved().audience, "billing");
/// # Ok::<(), jwtkeeper::Error>(())
/// ```
#[derive(Clone)]
pub struct TokenAuthority {
    config: Arc<SigningConfig>,
    signer: Signer,
    verifier: Verifier,
}

impl TokenAuthority {
    pub fn new(config: SigningConfig) -> Self {
        let config = Arc::new(config);
        Self {
            signer: Signer::new(Arc::clone(&config)),
            verifier: Verifier::new(Arc::clone(&config)),
            config,
        }
    }

    /// Issue an access token for `audience` carrying `custom_claims`
    pub fn issue_access(&self, audience: &str, custom_claims: Object) -> Result<String> {
        self.signer.issue_access(audience, custom_claims)
    }

    /// Issue a refresh token for `audience`
    pub fn issue_refresh(&self, audience: &str) -> Result<String> {
        self.signer.issue_refresh(audience)
    }

    /// Verify a token of either kind
    pub fn verify(&self, audience: &str, token: &str) -> Result<ClaimSet> {
        self.verifier.verify(audience, token)
    }

    /// Verify a token and require it to be an access token
    pub fn verify_access(&self, audience: &str, token: &str) -> Result<ClaimSet> {
        self.verifier.verify_kind(audience, token, TokenKind::Access)
    }

    /// Verify a token and require it to be a refresh token
    pub fn verify_refresh(&self, audience: &str, token: &str) -> Result<ClaimSet> {
        self.verifier.verify_kind(audience, token, TokenKind::Refresh)
    }

    pub fn config(&self) -> &SigningConfig {
        &self.config
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }
}

impl std::fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::revocation::{RevocationList, RevocationRegistry};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_authority_is_send_sync() {
        assert_send_sync::<TokenAuthority>();
    }

    #[test]
    fn test_round_trip() {
        let authority = TokenAuthority::new(SigningConfig::builder("secret").build().unwrap());

        let access = authority.issue_access("svc", Object::new()).unwrap();
        let refresh = authority.issue_refresh("svc").unwrap();

        assert_eq!(authority.verify("svc", &access).unwrap().token_kind(), TokenKind::Access);
        assert_eq!(authority.verify("svc", &refresh).unwrap().token_kind(), TokenKind::Refresh);
        assert!(authority.verify_access("svc", &access).is_ok());
        assert!(authority.verify_refresh("svc", &refresh).is_ok());
    }

    #[test]
    fn test_kind_enforced() {
        let authority = TokenAuthority::new(SigningConfig::builder("secret").build().unwrap());
        let access = authority.issue_access("svc", Object::new()).unwrap();

        assert!(matches!(
            authority.verify_refresh("svc", &access),
            Err(Error::TokenKindMismatch { .. })
        ));
    }

    #[test]
    fn test_clones_share_revocations() {
        let registry = Arc::new(RevocationList::new());
        let authority = TokenAuthority::new(
            SigningConfig::builder("secret")
                .revocations(registry.clone())
                .build()
                .unwrap(),
        );
        let other = authority.clone();

        let token = authority.issue_refresh("svc").unwrap();
        let claims = other.verify("svc", &token).unwrap();
        registry.insert(claims.token_id().to_string());

        assert!(matches!(authority.verify("svc", &token), Err(Error::Revoked { .. })));
        assert!(matches!(other.verify("svc", &token), Err(Error::Revoked { .. })));
    }
}
