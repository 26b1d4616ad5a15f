//! Algorithm support for JWT signing and verification
use crate::error::{Error, Result};
use crate::limits::{MAX_ALG_LENGTH, MAX_DECODED_SIGNATURE_SIZE};
use crate::utils::base64url;

use aws_lc_rs::hmac;

/// Algorithm identifier carried in the JWT header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AlgorithmType {
    #[default]
    HS256,
    HS384,
    HS512,
}

impl std::str::FromStr for AlgorithmType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Validate algorithm string length before parsing to prevent DoS
        if s.len() > MAX_ALG_LENGTH {
            return Err(Error::AlgorithmUnsupported(format!(
                "Algorithm string too long: {} bytes (maximum: {} bytes)",
                s.len(),
                MAX_ALG_LENGTH
            )));
        }

        match s {
            "none" => Err(Error::AlgorithmNoneRejected),
            "HS256" => Ok(AlgorithmType::HS256),
            "HS384" => Ok(AlgorithmType::HS384),
            "HS512" => Ok(AlgorithmType::HS512),
            _ => Err(Error::AlgorithmUnsupported(s.into())),
        }
    }
}

impl AlgorithmType {
    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmType::HS256 => "HS256",
            AlgorithmType::HS384 => "HS384",
            AlgorithmType::HS512 => "HS512",
        }
    }

    fn hmac_algorithm(&self) -> hmac::Algorithm {
        match self {
            AlgorithmType::HS256 => hmac::HMAC_SHA256,
            AlgorithmType::HS384 => hmac::HMAC_SHA384,
            AlgorithmType::HS512 => hmac::HMAC_SHA512,
        }
    }

    /// Sign the signing input (header.payload) and return the Base64URL signature
    pub(crate) fn sign(&self, signing_input: &str, secret: &[u8]) -> String {
        let key = hmac::Key::new(self.hmac_algorithm(), secret);
        let tag = hmac::sign(&key, signing_input.as_bytes());
        base64url::encode(tag.as_ref())
    }

    /// Verify a Base64URL signature over the signing input
    ///
    /// The tag comparison is constant-time. Any decoding problem with the
    /// signature segment is reported as a bad signature, since the segment
    /// is only meaningful relative to the key.
    pub(crate) fn verify_signature(
        &self,
        signing_input: &str,
        signature: &str,
        secret: &[u8],
    ) -> Result<()> {
        let signature_bytes = base64url::decode_bytes(signature, MAX_DECODED_SIGNATURE_SIZE)
            .map_err(|_| Error::BadSignature)?;
        let key = hmac::Key::new(self.hmac_algorithm(), secret);

        hmac::verify(&key, signing_input.as_bytes(), &signature_bytes)
            .map_err(|_| Error::BadSignature)
    }
}

impl std::fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
