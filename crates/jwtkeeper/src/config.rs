//! Signing configuration shared by issuance and verification

use crate::algorithm::AlgorithmType;
use crate::claims::TokenKind;
use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::limits::{MAX_ISSUER_LENGTH, MAX_LEEWAY_SECONDS, MAX_LIFETIME_SECONDS, MAX_SECRET_LENGTH};
use crate::revocation::{RevocationList, RevocationRegistry};
use crate::token_id::{RandomTokenIds, TokenIdSource};
use std::sync::Arc;

/// Issuer used when none is configured
pub const DEFAULT_ISSUER: &str = "jwt.example.com";

/// Access token lifetime used when none is configured (15 minutes)
pub const DEFAULT_ACCESS_LIFETIME_SECONDS: u64 = 15 * 60;

/// Refresh token lifetime used when none is configured (14 days)
pub const DEFAULT_REFRESH_LIFETIME_SECONDS: u64 = 14 * 86400;

/// What to do when a custom claim uses a reserved claim name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClaimCollisionPolicy {
    /// The custom value replaces the reserved one. A warning is logged.
    #[default]
    Override,
    /// Issuance fails with [`Error::ReservedClaimCollision`].
    Reject,
}

/// Immutable configuration for signing and verifying tokens
///
/// Built once through [`SigningConfig::builder`] and shared behind an `Arc`
/// by the signer and the verifier.
pub struct SigningConfig {
    algorithm: AlgorithmType,
    secret: Box<[u8]>,
    issuer: String,
    access_lifetime: u64,
    refresh_lifetime: u64,
    leeway: u64,
    collision_policy: ClaimCollisionPolicy,
    revocations: Arc<dyn RevocationRegistry>,
    clock: Arc<dyn Clock>,
    token_ids: Arc<dyn TokenIdSource>,
}

impl SigningConfig {
    /// Start configuring with the signing secret
    pub fn builder(secret: impl AsRef<[u8]>) -> SigningConfigBuilder {
        SigningConfigBuilder::new(secret.as_ref())
    }

    pub fn algorithm(&self) -> AlgorithmType {
        self.algorithm
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Lifetime in seconds for tokens of `kind`
    pub fn lifetime(&self, kind: TokenKind) -> u64 {
        match kind {
            TokenKind::Access => self.access_lifetime,
            TokenKind::Refresh => self.refresh_lifetime,
        }
    }

    /// Clock leeway in seconds applied to `nbf` and `exp`
    pub fn leeway(&self) -> u64 {
        self.leeway
    }

    pub fn collision_policy(&self) -> ClaimCollisionPolicy {
        self.collision_policy
    }

    /// The revocation registry consulted on every verification
    pub fn revocations(&self) -> &dyn RevocationRegistry {
        self.revocations.as_ref()
    }

    pub(crate) fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub(crate) fn now(&self) -> i64 {
        self.clock.now()
    }

    pub(crate) fn next_token_id(&self) -> String {
        self.token_ids.next_id()
    }
}

impl std::fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("algorithm", &self.algorithm)
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("access_lifetime", &self.access_lifetime)
            .field("refresh_lifetime", &self.refresh_lifetime)
            .field("leeway", &self.leeway)
            .field("collision_policy", &self.collision_policy)
            .finish_non_exhaustive()
    }
}

/// Builder for [`SigningConfig`]
///
/// Bounds are checked once in [`build`](Self::build); the resulting
/// configuration is never mutated.
#[derive(Clone)]
pub struct SigningConfigBuilder {
    secret: Vec<u8>,
    algorithm: AlgorithmType,
    algorithm_name: Option<String>,
    issuer: String,
    access_lifetime: u64,
    refresh_lifetime: u64,
    leeway: u64,
    collision_policy: ClaimCollisionPolicy,
    revocations: Option<Arc<dyn RevocationRegistry>>,
    clock: Arc<dyn Clock>,
    token_ids: Arc<dyn TokenIdSource>,
}

impl SigningConfigBuilder {
    fn new(secret: &[u8]) -> Self {
        Self {
            secret: secret.to_vec(),
            algorithm: AlgorithmType::default(),
            algorithm_name: None,
            issuer: DEFAULT_ISSUER.to_string(),
            access_lifetime: DEFAULT_ACCESS_LIFETIME_SECONDS,
            refresh_lifetime: DEFAULT_REFRESH_LIFETIME_SECONDS,
            leeway: 0,
            collision_policy: ClaimCollisionPolicy::default(),
            revocations: None,
            clock: Arc::new(SystemClock),
            token_ids: Arc::new(RandomTokenIds),
        }
    }

    /// Configure the signing algorithm
    pub fn algorithm(&mut self, algorithm: AlgorithmType) -> &mut Self {
        self.algorithm = algorithm;
        self.algorithm_name = None;
        self
    }

    /// Configure the signing algorithm by its JWT name (e.g. "HS256")
    ///
    /// The name is parsed in [`build`](Self::build).
    pub fn algorithm_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.algorithm_name = Some(name.into());
        self
    }

    /// Configure the issuer written to and required in `iss`
    pub fn issuer(&mut self, issuer: impl Into<String>) -> &mut Self {
        self.issuer = issuer.into();
        self
    }

    /// Configure the access token lifetime in seconds
    pub fn access_lifetime(&mut self, seconds: u64) -> &mut Self {
        self.access_lifetime = seconds;
        self
    }

    /// Configure the refresh token lifetime in seconds
    pub fn refresh_lifetime(&mut self, seconds: u64) -> &mut Self {
        self.refresh_lifetime = seconds;
        self
    }

    /// Configure clock leeway for `nbf` and `exp` checks
    ///
    /// # Security
    /// Leeway is limited to 300 seconds so it cannot effectively disable
    /// expiration checks.
    pub fn leeway(&mut self, seconds: u64) -> &mut Self {
        self.leeway = seconds;
        self
    }

    /// Configure handling of custom claims named like reserved claims
    pub fn collision_policy(&mut self, policy: ClaimCollisionPolicy) -> &mut Self {
        self.collision_policy = policy;
        self
    }

    /// Configure the revocation registry
    ///
    /// Defaults to a fresh, empty [`RevocationList`] that only this
    /// configuration can reach; pass your own handle to revoke tokens.
    pub fn revocations(&mut self, registry: Arc<dyn RevocationRegistry>) -> &mut Self {
        self.revocations = Some(registry);
        self
    }

    /// Configure the clock
    pub fn clock(&mut self, clock: Arc<dyn Clock>) -> &mut Self {
        self.clock = clock;
        self
    }

    /// Configure the token identifier source
    pub fn token_ids(&mut self, token_ids: Arc<dyn TokenIdSource>) -> &mut Self {
        self.token_ids = token_ids;
        self
    }

    /// Validate the settings and build the configuration
    pub fn build(&self) -> Result<SigningConfig> {
        let algorithm = match &self.algorithm_name {
            Some(name) => name.parse::<AlgorithmType>()?,
            None => self.algorithm,
        };

        if self.secret.is_empty() {
            return Err(Error::ConfigurationInvalid(
                "signing secret must not be empty".into(),
            ));
        }
        if self.secret.len() > MAX_SECRET_LENGTH {
            return Err(Error::ConfigurationInvalid(format!(
                "signing secret too long: {} bytes (maximum: {MAX_SECRET_LENGTH} bytes)",
                self.secret.len()
            )));
        }

        if self.issuer.is_empty() {
            return Err(Error::ConfigurationInvalid("issuer must not be empty".into()));
        }
        if self.issuer.len() > MAX_ISSUER_LENGTH {
            return Err(Error::ConfigurationInvalid(format!(
                "issuer too long: {} bytes (maximum: {MAX_ISSUER_LENGTH} bytes)",
                self.issuer.len()
            )));
        }

        validate_lifetime("access", self.access_lifetime)?;
        validate_lifetime("refresh", self.refresh_lifetime)?;

        if self.leeway > MAX_LEEWAY_SECONDS {
            return Err(Error::ConfigurationInvalid(format!(
                "leeway too large: {} seconds (maximum: {MAX_LEEWAY_SECONDS} seconds)",
                self.leeway
            )));
        }

        let revocations = self
            .revocations
            .clone()
            .unwrap_or_else(|| Arc::new(RevocationList::new()));

        Ok(SigningConfig {
            algorithm,
            secret: self.secret.clone().into_boxed_slice(),
            issuer: self.issuer.clone(),
            access_lifetime: self.access_lifetime,
            refresh_lifetime: self.refresh_lifetime,
            leeway: self.leeway,
            collision_policy: self.collision_policy,
            revocations,
            clock: Arc::clone(&self.clock),
            token_ids: Arc::clone(&self.token_ids),
        })
    }
}

fn validate_lifetime(kind: &str, seconds: u64) -> Result<()> {
    if seconds == 0 {
        return Err(Error::ConfigurationInvalid(format!(
            "{kind} token lifetime must be positive"
        )));
    }
    if seconds > MAX_LIFETIME_SECONDS {
        return Err(Error::ConfigurationInvalid(format!(
            "{kind} token lifetime too large: {seconds} seconds (maximum: {MAX_LIFETIME_SECONDS} seconds)"
        )));
    }
    Ok(())
}
