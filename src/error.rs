//! Error types and result utilities for the narration audio pipeline.
//!
//! Errors are hierarchical: [`AudioError`] is what every public operation returns, and
//! each variant wraps a stage-specific error carrying the details of what went wrong.
//!
//! ```rust
//! use scene_audio::{AudioError, AudioResult, ShapeError};
//!
//! let result: AudioResult<()> = Err(AudioError::Shape(ShapeError::invalid_channels(0)));
//!
//! match result {
//!     Ok(()) => {}
//!     Err(AudioError::Decode(err)) => eprintln!("bad payload: {err}"),
//!     Err(AudioError::Shape(err)) => eprintln!("bad stream layout: {err}"),
//!     Err(other) => eprintln!("other error: {other}"),
//! }
//! ```

use thiserror::Error;

/// Convenience type alias for results that may contain an [`AudioError`].
pub type AudioResult<T> = Result<T, AudioError>;

/// Top-level error returned by every fallible operation in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The base64 payload could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Sample rate, channel count or channel data do not describe a valid stream.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// A WAVE container could not be written or read.
    #[error(transparent)]
    Wav(#[from] WavError),
}

/// Errors raised while decoding a base64 payload into raw bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input contains a symbol outside the standard base64 alphabet.
    #[error("Invalid base64 symbol {symbol:?} at offset {offset}")]
    InvalidSymbol {
        /// Offending character.
        symbol: char,
        /// Byte offset of the character in the whitespace-stripped input.
        offset: usize,
    },

    /// The input is structurally malformed (bad length, misplaced padding, ...).
    #[error("Malformed base64 input: {reason}")]
    Malformed {
        /// Description reported by the underlying decoder.
        reason: String,
    },
}

impl From<base64::DecodeError> for DecodeError {
    fn from(err: base64::DecodeError) -> Self {
        match err {
            base64::DecodeError::InvalidByte(offset, byte) => Self::InvalidSymbol {
                symbol: char::from(byte),
                offset,
            },
            other => Self::Malformed {
                reason: other.to_string(),
            },
        }
    }
}

impl From<base64::DecodeError> for AudioError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decode(err.into())
    }
}

impl DecodeError {
    /// Create a malformed-input error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

/// Errors describing an impossible stream or buffer shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Sample rate must be a positive number of Hz.
    #[error("Invalid sample rate {sample_rate}: must be > 0")]
    InvalidSampleRate {
        /// Rejected sample rate.
        sample_rate: u32,
    },

    /// A stream needs at least one channel.
    #[error("Invalid channel count {channels}: must be >= 1")]
    InvalidChannels {
        /// Rejected channel count.
        channels: usize,
    },

    /// Channels handed to a constructor do not all have the same length.
    #[error("Channel {channel} has {actual} samples, expected {expected}")]
    RaggedChannels {
        /// Index of the first mismatching channel.
        channel: usize,
        /// Length of channel 0.
        expected: usize,
        /// Length of the mismatching channel.
        actual: usize,
    },

    /// A channel index is past the end of the buffer.
    #[error("Channel index {index} out of range for {channels} channel(s)")]
    ChannelOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of channels in the buffer.
        channels: usize,
    },
}

impl ShapeError {
    /// Create an invalid sample rate error.
    pub const fn invalid_sample_rate(sample_rate: u32) -> Self {
        Self::InvalidSampleRate { sample_rate }
    }

    /// Create an invalid channel count error.
    pub const fn invalid_channels(channels: usize) -> Self {
        Self::InvalidChannels { channels }
    }

    /// Create a ragged channel error.
    pub const fn ragged(channel: usize, expected: usize, actual: usize) -> Self {
        Self::RaggedChannels {
            channel,
            expected,
            actual,
        }
    }

    /// Create a channel-out-of-range error.
    pub const fn channel_out_of_range(index: usize, channels: usize) -> Self {
        Self::ChannelOutOfRange { index, channels }
    }
}

/// Errors raised while writing or reading a WAVE container.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WavError {
    /// A header field would overflow its fixed width.
    #[error("WAV field `{field}` cannot hold {value}")]
    FieldOverflow {
        /// Header field name.
        field: &'static str,
        /// Value that does not fit.
        value: u64,
    },

    /// The container could not be parsed as RIFF/WAVE.
    #[error("Malformed WAV container: {reason}")]
    Malformed {
        /// Description reported by the WAVE reader.
        reason: String,
    },

    /// Only 16-bit integer PCM is understood.
    #[error("Unsupported WAV encoding: format tag {format_tag}, {bits_per_sample} bits per sample")]
    UnsupportedEncoding {
        /// `fmt ` audio format tag.
        format_tag: u16,
        /// `fmt ` bits per sample.
        bits_per_sample: u16,
    },

    /// The byte slice ends before the declared data does.
    #[error("Truncated WAV data: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes required by the header.
        needed: usize,
        /// Bytes actually present.
        available: usize,
    },
}

impl WavError {
    /// Create a field overflow error.
    pub const fn field_overflow(field: &'static str, value: u64) -> Self {
        Self::FieldOverflow { field, value }
    }

    /// Create a malformed-container error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    /// Create a truncated-data error.
    pub const fn truncated(needed: usize, available: usize) -> Self {
        Self::Truncated { needed, available }
    }
}

impl From<hound::Error> for WavError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                Self::malformed("unexpected end of file")
            }
            other => Self::malformed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_byte_maps_to_symbol() {
        let err = DecodeError::from(base64::DecodeError::InvalidByte(3, b'*'));
        assert_eq!(
            err,
            DecodeError::InvalidSymbol {
                symbol: '*',
                offset: 3
            }
        );
    }

    #[test]
    fn test_other_base64_errors_are_malformed() {
        let err = DecodeError::from(base64::DecodeError::InvalidLength(5));
        assert!(matches!(err, DecodeError::Malformed { .. }));

        let err: AudioError = base64::DecodeError::InvalidPadding.into();
        assert!(matches!(err, AudioError::Decode(DecodeError::Malformed { .. })));
    }

    #[test]
    fn test_messages_are_transparent() {
        let err: AudioError = ShapeError::invalid_sample_rate(0).into();
        assert_eq!(err.to_string(), "Invalid sample rate 0: must be > 0");

        let err: AudioError = WavError::malformed("no RIFF tag found").into();
        assert!(err.to_string().contains("RIFF"));
    }

    #[test]
    fn test_reader_errors_map_to_malformed() {
        match WavError::from(hound::Error::FormatError("no WAVE tag found")) {
            WavError::Malformed { reason } => assert!(reason.contains("no WAVE tag found")),
            other => panic!("unexpected {other:?}"),
        }

        let eof = std::io::Error::from(std::io::ErrorKind::UnexpectedEof);
        assert!(matches!(
            WavError::from(hound::Error::IoError(eof)),
            WavError::Malformed { .. }
        ));
    }
}
