//! Unpadded Base64URL for token segments
//!
//! Decoding is bounded twice: the encoded length is checked against the
//! largest input that can decode to `max_size` bytes before any work is done,
//! then the decoded length is checked exactly.

use crate::error::{Error, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Encode a segment
pub(crate) fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Longest unpadded encoding of `decoded` bytes
const fn encoded_len(decoded: usize) -> usize {
    (decoded / 3) * 4
        + match decoded % 3 {
            0 => 0,
            rem => rem + 1,
        }
}

/// Decode a segment of at most `max_size` decoded bytes
pub(crate) fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>> {
    if input.len() > encoded_len(max_size) {
        return Err(Error::MalformedToken(format!(
            "segment too large: {} encoded bytes (maximum: {max_size} decoded bytes)",
            input.len()
        )));
    }

    let decoded = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| Error::MalformedToken(format!("invalid Base64URL segment: {e}")))?;
    if decoded.len() > max_size {
        return Err(Error::MalformedToken(format!(
            "segment too large: {} bytes (maximum: {max_size} bytes)",
            decoded.len()
        )));
    }
    Ok(decoded)
}

/// Decode a segment holding UTF-8 text (header or payload JSON)
pub(crate) fn decode_string(input: &str, max_size: usize) -> Result<String> {
    let bytes = decode_bytes(input, max_size)?;
    String::from_utf8(bytes)
        .map_err(|e| Error::MalformedToken(format!("segment is not UTF-8: {e}")))
}
