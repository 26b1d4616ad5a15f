//! A minimal JWT issuing and verification library for HMAC-signed access and
//! refresh tokens.
//!
//! Tokens are compact JWS strings carrying a fixed set of reserved claims
//! (`exp`, `iat`, `nbf`, `iss`, `aud`, `token_type`, `token_id`). Access
//! tokens may carry additional caller claims; refresh tokens never do.
//!
//! Claim maps use [`miniserde`]'s JSON model, re-exported as [`Object`],
//! [`Value`] and [`Number`].

mod error;

// Internal modules
pub(crate) mod header;
pub(crate) mod limits;
pub(crate) mod utils;

pub mod algorithm;
pub mod authority;
pub mod claims;
pub mod clock;
pub mod config;
pub mod revocation;
pub mod signer;
pub mod token_id;
pub mod verifier;

// Public Interface
pub use algorithm::AlgorithmType;
pub use authority::TokenAuthority;
pub use claims::{ClaimBuilder, ClaimSet, RESERVED_CLAIMS, ReservedClaims, TokenKind};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ClaimCollisionPolicy, SigningConfig, SigningConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use revocation::{RevocationList, RevocationRegistry};
pub use signer::Signer;
pub use token_id::{RandomTokenIds, SequentialTokenIds, TokenIdSource};
pub use verifier::Verifier;

pub use miniserde::json::{Number, Object, Value};
