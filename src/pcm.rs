//! Raw 16-bit PCM to [`AudioBuffer`] decoding.
//!
//! The stream is interpreted as interleaved little-endian signed 16-bit samples. Each
//! value is divided by 32768, so the decoded range is `[-1.0, 1.0)`.

use ndarray::Array2;

use crate::config::BYTES_PER_SAMPLE;
use crate::{AudioBuffer, AudioResult, PcmFloat, PcmSpec, decode_base64};

/// Decode interleaved 16-bit little-endian PCM into a per-channel float buffer.
///
/// Frame count is `floor(floor(len / 2) / channels)`. A trailing odd byte, and any
/// samples of a trailing incomplete frame, are ignored. An empty input yields a buffer
/// with zero frames and the requested layout.
///
/// # Errors
/// [`ShapeError`](crate::ShapeError) if `spec` has a zero sample rate or channel count.
///
/// ```rust
/// use scene_audio::{decode_pcm, PcmSpec};
///
/// let audio = decode_pcm::<f32>(&[0x00, 0x00, 0xFF, 0xFF], PcmSpec::TTS).unwrap();
/// assert_eq!(audio.channel(0).unwrap().to_vec(), vec![0.0, -1.0 / 32768.0]);
/// ```
pub fn decode_pcm<T: PcmFloat>(bytes: &[u8], spec: PcmSpec) -> AudioResult<AudioBuffer<T>> {
    spec.validate()?;

    let channels = usize::from(spec.channels());
    let frames = spec.frames_for_bytes(bytes.len());
    let used = frames * spec.block_align();
    if used != bytes.len() {
        tracing::warn!(
            total_bytes = bytes.len(),
            dropped_bytes = bytes.len() - used,
            channels,
            "ignoring trailing partial PCM frame"
        );
    }

    let mut data = Array2::<T>::zeros((channels, frames));
    for (frame, chunk) in bytes[..used].chunks_exact(spec.block_align()).enumerate() {
        for (channel, sample) in chunk.chunks_exact(BYTES_PER_SAMPLE).enumerate() {
            data[[channel, frame]] = T::from_pcm_i16(i16::from_le_bytes([sample[0], sample[1]]));
        }
    }

    let audio = AudioBuffer::new(data, spec.sample_rate())?;
    tracing::debug!(
        sample_rate = spec.sample_rate(),
        channels,
        frames,
        peak = %audio.peak(),
        "decoded PCM stream"
    );
    Ok(audio)
}

/// Decode a base64 string carrying raw PCM, as returned by the text-to-speech service.
///
/// # Errors
/// [`DecodeError`](crate::DecodeError) for a malformed payload, otherwise as
/// [`decode_pcm`].
pub fn decode_pcm_base64<T: PcmFloat>(encoded: &str, spec: PcmSpec) -> AudioResult<AudioBuffer<T>> {
    let bytes = decode_base64(encoded)?;
    decode_pcm(&bytes, spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AudioError, DecodeError, ShapeError};
    use approx_eq::assert_approx_eq;

    fn stereo() -> PcmSpec {
        PcmSpec::new(48_000, 2).unwrap()
    }

    #[test]
    fn test_decode_mono_values() {
        let bytes = [0x00, 0x80, 0xFF, 0x7F, 0x00, 0x40, 0x00, 0x00];
        let audio = decode_pcm::<f64>(&bytes, PcmSpec::TTS).unwrap();

        let left = audio.channel(0).unwrap();
        assert_eq!(left[0], -1.0);
        assert_approx_eq!(left[1], 32767.0 / 32768.0, 1e-12);
        assert_eq!(left[2], 0.5);
        assert_eq!(left[3], 0.0);
        assert_eq!(audio.sample_rate(), 24_000);
    }

    #[test]
    fn test_decode_deinterleaves_channels() {
        // L0=1, R0=-1, L1=2, R1=-2
        let bytes = [0x01, 0x00, 0xFF, 0xFF, 0x02, 0x00, 0xFE, 0xFF];
        let audio = decode_pcm::<f32>(&bytes, stereo()).unwrap();

        assert_eq!(audio.num_channels(), 2);
        assert_eq!(audio.frame_count(), 2);
        assert_eq!(
            audio.channel(0).unwrap().to_vec(),
            vec![1.0 / 32768.0, 2.0 / 32768.0]
        );
        assert_eq!(
            audio.channel(1).unwrap().to_vec(),
            vec![-1.0 / 32768.0, -2.0 / 32768.0]
        );
    }

    #[test]
    fn test_empty_input() {
        let audio = decode_pcm::<f32>(&[], PcmSpec::TTS).unwrap();
        assert_eq!(audio.num_channels(), 1);
        assert_eq!(audio.frame_count(), 0);
        assert_eq!(audio.sample_rate(), 24_000);
    }

    #[test]
    fn test_odd_trailing_byte_ignored() {
        let even = decode_pcm::<f32>(&[0x00, 0x40, 0x00, 0xC0], PcmSpec::TTS).unwrap();
        let odd = decode_pcm::<f32>(&[0x00, 0x40, 0x00, 0xC0, 0x7F], PcmSpec::TTS).unwrap();
        assert_eq!(even, odd);
    }

    #[test]
    fn test_incomplete_trailing_frame_ignored() {
        let audio = decode_pcm::<f32>(&[0x01, 0x00, 0x02, 0x00, 0x03, 0x00], stereo()).unwrap();
        assert_eq!(audio.frame_count(), 1);
        assert_eq!(audio.channel(1).unwrap()[0], 2.0 / 32768.0);
    }

    #[test]
    fn test_decoded_range() {
        let bytes: Vec<u8> = (i16::MIN..=i16::MAX)
            .step_by(251)
            .chain([i16::MAX])
            .flat_map(i16::to_le_bytes)
            .collect();
        let audio = decode_pcm::<f32>(&bytes, PcmSpec::TTS).unwrap();
        assert!(audio.data().iter().all(|&s| (-1.0..1.0).contains(&s)));
    }

    #[test]
    fn test_base64_scenario() {
        let audio = decode_pcm_base64::<f32>("AAD//w==", PcmSpec::TTS).unwrap();
        assert_eq!(audio.channel(0).unwrap().to_vec(), vec![0.0, -1.0 / 32768.0]);
    }

    #[test]
    fn test_base64_errors_propagate() {
        assert!(matches!(
            decode_pcm_base64::<f32>("AA!A", PcmSpec::TTS),
            Err(AudioError::Decode(DecodeError::InvalidSymbol { symbol: '!', .. }))
        ));
    }

    #[test]
    fn test_invalid_spec_is_rejected() {
        #[cfg(feature = "serialization")]
        {
            let zero_channels: PcmSpec =
                serde_json::from_str(r#"{"sampleRate":24000,"channels":0}"#).unwrap();
            assert!(matches!(
                decode_pcm::<f32>(&[0, 0], zero_channels),
                Err(AudioError::Shape(ShapeError::InvalidChannels { channels: 0 }))
            ));
        }
        assert!(PcmSpec::new(0, 1).is_err());
    }
}
