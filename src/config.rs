//! Stream parameters for raw PCM payloads.

use crate::{AudioResult, ShapeError};

/// Bytes per 16-bit sample.
pub const BYTES_PER_SAMPLE: usize = 2;
/// Bits per sample of every stream this crate reads or writes.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Layout of a raw interleaved 16-bit little-endian PCM stream.
///
/// The default is the text-to-speech service's fixed output: 24 kHz mono.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PcmSpec {
    sample_rate: u32,
    channels: u16,
}

impl PcmSpec {
    /// Text-to-speech narration stream: 24000 Hz, 1 channel.
    pub const TTS: Self = Self {
        sample_rate: 24_000,
        channels: 1,
    };

    /// Create a validated stream description.
    ///
    /// # Errors
    /// [`ShapeError`] if `sample_rate` is zero or `channels` is zero.
    pub fn new(sample_rate: u32, channels: u16) -> AudioResult<Self> {
        let spec = Self {
            sample_rate,
            channels,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check the invariants. Needed for values that arrived through deserialisation.
    ///
    /// # Errors
    /// [`ShapeError`] if `sample_rate` is zero or `channels` is zero.
    pub fn validate(&self) -> AudioResult<()> {
        if self.sample_rate == 0 {
            return Err(ShapeError::invalid_sample_rate(self.sample_rate).into());
        }
        if self.channels == 0 {
            return Err(ShapeError::invalid_channels(usize::from(self.channels)).into());
        }
        Ok(())
    }

    /// Sample rate in Hz.
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of interleaved channels.
    pub const fn channels(&self) -> u16 {
        self.channels
    }

    /// Bytes per frame (`channels * 2`).
    pub const fn block_align(&self) -> usize {
        self.channels as usize * BYTES_PER_SAMPLE
    }

    /// Bytes per second of audio.
    pub const fn byte_rate(&self) -> u64 {
        self.sample_rate as u64 * self.block_align() as u64
    }

    /// Number of whole frames contained in `byte_len` bytes.
    ///
    /// A trailing odd byte and a trailing incomplete frame are not counted.
    pub const fn frames_for_bytes(&self, byte_len: usize) -> usize {
        if self.channels == 0 {
            return 0;
        }
        (byte_len / BYTES_PER_SAMPLE) / self.channels as usize
    }
}

impl Default for PcmSpec {
    fn default() -> Self {
        Self::TTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AudioError;

    #[test]
    fn test_default_is_tts_stream() {
        let spec = PcmSpec::default();
        assert_eq!(spec.sample_rate(), 24_000);
        assert_eq!(spec.channels(), 1);
        assert_eq!(spec.block_align(), 2);
        assert_eq!(spec.byte_rate(), 48_000);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            PcmSpec::new(0, 1),
            Err(AudioError::Shape(ShapeError::InvalidSampleRate { sample_rate: 0 }))
        ));
        assert!(matches!(
            PcmSpec::new(44_100, 0),
            Err(AudioError::Shape(ShapeError::InvalidChannels { channels: 0 }))
        ));
        assert!(PcmSpec::new(44_100, 2).is_ok());
    }

    #[test]
    fn test_frames_for_bytes() {
        let mono = PcmSpec::TTS;
        assert_eq!(mono.frames_for_bytes(0), 0);
        assert_eq!(mono.frames_for_bytes(1), 0);
        assert_eq!(mono.frames_for_bytes(7), 3);

        let stereo = PcmSpec::new(48_000, 2).unwrap();
        assert_eq!(stereo.frames_for_bytes(8), 2);
        assert_eq!(stereo.frames_for_bytes(11), 2);
        assert_eq!(stereo.frames_for_bytes(12), 3);
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_serde_round_trip() {
        let spec = PcmSpec::new(48_000, 2).unwrap();
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"sampleRate":48000,"channels":2}"#);

        let back: PcmSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);

        let bad: PcmSpec = serde_json::from_str(r#"{"sampleRate":0,"channels":1}"#).unwrap();
        assert!(bad.validate().is_err());
    }
}
