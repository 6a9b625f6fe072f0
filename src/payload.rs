//! Base64 transport of raw PCM payloads.
//!
//! Text-to-speech responses carry their audio as a base64 string. Decoding follows the
//! same forgiving rules browsers apply: ASCII whitespace is skipped, `=` padding may be
//! present or absent, and unused trailing bits are ignored. Any other character outside
//! the standard alphabet is an error.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::AudioResult;

const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode a standard-alphabet base64 string into raw bytes.
///
/// # Errors
/// [`DecodeError`](crate::DecodeError) if the input contains a non-alphabet, non-whitespace character or is
/// structurally malformed (e.g. a single dangling symbol).
///
/// ```rust
/// use scene_audio::decode_base64;
///
/// assert_eq!(decode_base64("AAD//w==").unwrap(), vec![0x00, 0x00, 0xFF, 0xFF]);
/// assert_eq!(decode_base64("AAD//w").unwrap(), vec![0x00, 0x00, 0xFF, 0xFF]);
/// assert!(decode_base64("AA*A").is_err());
/// ```
pub fn decode_base64(input: &str) -> AudioResult<Vec<u8>> {
    let decoded = if input.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = input
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        FORGIVING.decode(compact)
    } else {
        FORGIVING.decode(input)
    };

    let bytes = decoded?;
    tracing::trace!(
        encoded_len = input.len(),
        decoded_len = bytes.len(),
        "decoded base64 payload"
    );
    Ok(bytes)
}

/// Encode raw bytes as padded standard base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
