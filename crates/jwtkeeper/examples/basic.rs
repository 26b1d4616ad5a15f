//! Run with
//!
//! ```not_rust
//! RUST_LOG=jwtkeeper=debug cargo run --example basic
//! ```

use std::sync::Arc;

use jwtkeeper::{
    Error, Object, RevocationList, RevocationRegistry, SigningConfig, TokenAuthority, Value,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug,jwtkeeper=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let revocations = Arc::new(RevocationList::new());
    let config = SigningConfig::builder("change-me")
        .issuer("auth.example.com")
        .access_lifetime(300)
        .revocations(revocations.clone())
        .build()?;
    let authority = TokenAuthority::new(config);

    let mut claims = Object::new();
    claims.insert("user".to_string(), Value::String("alice".to_string()));

    let access = authority.issue_access("billing", claims)?;
    let refresh = authority.issue_refresh("billing")?;
    tracing::info!(%access, "issued access token");

    let verified = authority.verify_access("billing", &access)?;
    tracing::info!(token_id = %verified.token_id(), user = ?verified.get("user"), "access token accepted");

    let refreshed = authority.verify_refresh("billing", &refresh)?;
    revocations.insert(refreshed.token_id().to_string());

    match authority.verify_refresh("billing", &refresh) {
        Err(error @ Error::Revoked { .. }) => tracing::info!(%error, "refresh token rejected after logout"),
        other => tracing::warn!(?other, "unexpected verification result"),
    }

    Ok(())
}
