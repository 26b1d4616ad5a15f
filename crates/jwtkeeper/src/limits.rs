//! Size limit constants for input validation

/// Maximum length for a JWT token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

// ============================================================================
// Decoded segment size limits
// ============================================================================

/// Maximum size for decoded JWT header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded JWT payload JSON (64KB)
/// Payloads carry caller custom claims, but must be bounded to prevent DoS
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes
/// HMAC-SHA512 produces 64 bytes; anything larger cannot be ours
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 64;

/// Maximum size for Base64URL-encoded signature string
/// 64 bytes encode to 86 characters without padding
pub(crate) const MAX_SIGNATURE_B64_SIZE: usize = 86;

// ============================================================================
// Header field size limits
// ============================================================================

/// Maximum length for algorithm (alg) field in JWT header (16 bytes)
pub(crate) const MAX_ALG_LENGTH: usize = 16;

// ============================================================================
// Configuration bounds
// ============================================================================

/// Maximum length for the configured issuer (2048 bytes)
pub(crate) const MAX_ISSUER_LENGTH: usize = 2048;

/// Maximum length for the signing secret (4KB)
pub(crate) const MAX_SECRET_LENGTH: usize = 4 * 1024;

/// Maximum clock leeway (300 seconds = 5 minutes)
/// Prevents leeway from effectively disabling expiration checks
pub(crate) const MAX_LEEWAY_SECONDS: u64 = 300;

/// Maximum token lifetime (1 year = 31,536,000 seconds)
pub(crate) const MAX_LIFETIME_SECONDS: u64 = 86400 * 365;

// ============================================================================
// Timestamp bounds
// ============================================================================

/// Minimum valid Unix timestamp (1970-01-01 00:00:00 UTC)
pub(crate) const MIN_TIMESTAMP: i64 = 0;

/// Maximum valid Unix timestamp (2100-01-01 00:00:00 UTC)
pub(crate) const MAX_TIMESTAMP: i64 = 4_102_444_800;
