//! In-memory representation of decoded narration audio.
//!
//! [`AudioBuffer`] pairs a `(channels, frames)` [`ndarray::Array2`] with the sample rate it
//! was recorded at. Channels are rows, so the "every channel has the same length"
//! invariant is enforced by the array shape rather than checked at each use.
//!
//! ```rust
//! use scene_audio::AudioBuffer;
//! use ndarray::array;
//!
//! let stereo = AudioBuffer::new(
//!     array![
//!         [0.1f32, 0.2, 0.3], // left
//!         [0.4f32, 0.5, 0.6], // right
//!     ],
//!     48_000,
//! )
//! .unwrap();
//!
//! assert_eq!(stereo.num_channels(), 2);
//! assert_eq!(stereo.frame_count(), 3);
//! assert_eq!(stereo.sample_rate(), 48_000);
//! ```

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use std::time::Duration;

use crate::config::BYTES_PER_SAMPLE;
use crate::{AudioResult, PcmFloat, PcmSpec, ShapeError, WavError};

/// Decoded audio: per-channel float samples normalised to `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer<T: PcmFloat = f32> {
    data: Array2<T>,
    spec: PcmSpec,
}

impl<T: PcmFloat> AudioBuffer<T> {
    /// Wrap a `(channels, frames)` array.
    ///
    /// # Errors
    /// [`ShapeError`] if the array has no rows, more rows than a WAVE header can describe,
    /// or `sample_rate` is zero.
    pub fn new(data: Array2<T>, sample_rate: u32) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(ShapeError::invalid_sample_rate(sample_rate).into());
        }
        let rows = data.nrows();
        let channels = u16::try_from(rows).map_err(|_| ShapeError::invalid_channels(rows))?;
        let spec = PcmSpec::new(sample_rate, channels)?;
        Ok(Self { data, spec })
    }

    /// Allocate a silent buffer with the layout of `spec`.
    pub fn silent(spec: PcmSpec, frames: usize) -> Self {
        Self {
            data: Array2::from_elem((usize::from(spec.channels()), frames), T::zero()),
            spec,
        }
    }

    /// Build from one `Vec` per channel.
    ///
    /// # Errors
    /// [`ShapeError::RaggedChannels`] if the channels differ in length, plus everything
    /// [`AudioBuffer::new`] rejects.
    pub fn from_channels(channels: Vec<Vec<T>>, sample_rate: u32) -> AudioResult<Self> {
        let frames = channels.first().map_or(0, Vec::len);
        if let Some((index, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, channel)| channel.len() != frames)
        {
            return Err(ShapeError::ragged(index, frames, channel.len()).into());
        }

        let rows = channels.len();
        let flat: Vec<T> = channels.into_iter().flatten().collect();
        // Lengths were checked above, so the shape always matches.
        let data = Array2::from_shape_vec((rows, frames), flat)
            .map_err(|_| ShapeError::invalid_channels(rows))?;
        Self::new(data, sample_rate)
    }

    /// Sample rate in Hz.
    pub const fn sample_rate(&self) -> u32 {
        self.spec.sample_rate()
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.data.nrows()
    }

    /// Samples per channel.
    pub fn frame_count(&self) -> usize {
        self.data.ncols()
    }

    /// `true` when the buffer holds zero frames.
    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    /// Playback length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.frame_count() as f64 / f64::from(self.sample_rate())
    }

    /// Playback length.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_seconds())
    }

    /// The stream layout this buffer would be written with.
    pub const fn spec(&self) -> PcmSpec {
        self.spec
    }

    /// View of every sample, channels as rows.
    pub fn data(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Samples of a single channel.
    ///
    /// # Errors
    /// [`ShapeError::ChannelOutOfRange`] if `index >= num_channels()`.
    pub fn channel(&self, index: usize) -> AudioResult<ArrayView1<'_, T>> {
        if index >= self.num_channels() {
            return Err(ShapeError::channel_out_of_range(index, self.num_channels()).into());
        }
        Ok(self.data.index_axis(Axis(0), index))
    }

    /// Iterate over frames; each item yields one sample per channel in channel order.
    pub fn frames(&self) -> impl Iterator<Item = ArrayView1<'_, T>> + '_ {
        self.data.axis_iter(Axis(1))
    }

    /// Largest absolute sample value, `0` for an empty buffer.
    pub fn peak(&self) -> T {
        self.data
            .iter()
            .fold(T::zero(), |peak, &sample| peak.max(sample.abs()))
    }

    /// Consume the buffer and return the underlying array.
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Size in bytes of the interleaved 16-bit payload.
    pub fn pcm_byte_len(&self) -> usize {
        self.frame_count() * self.num_channels() * BYTES_PER_SAMPLE
    }

    /// Quantise to interleaved little-endian 16-bit PCM.
    ///
    /// Frames are written in order and, inside a frame, channels in order.
    ///
    /// # Errors
    /// [`WavError::FieldOverflow`] if the payload would not fit in memory addressing.
    pub fn to_pcm_bytes(&self) -> AudioResult<Vec<u8>> {
        let len = self
            .frame_count()
            .checked_mul(self.num_channels())
            .and_then(|samples| samples.checked_mul(BYTES_PER_SAMPLE))
            .ok_or_else(|| WavError::field_overflow("pcm payload", u64::MAX))?;

        let mut bytes = Vec::with_capacity(len);
        for frame in self.frames() {
            for &sample in frame {
                bytes.extend_from_slice(&sample.to_pcm_i16().to_le_bytes());
            }
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AudioError;
    use approx_eq::assert_approx_eq;
    use ndarray::array;

    #[test]
    fn test_new_rejects_bad_shapes() {
        let empty_rows = Array2::<f32>::zeros((0, 4));
        assert!(matches!(
            AudioBuffer::new(empty_rows, 24_000),
            Err(AudioError::Shape(ShapeError::InvalidChannels { channels: 0 }))
        ));

        assert!(matches!(
            AudioBuffer::new(array![[0.0f32]], 0),
            Err(AudioError::Shape(ShapeError::InvalidSampleRate { .. }))
        ));

        let too_many = Array2::<f32>::zeros((usize::from(u16::MAX) + 1, 0));
        assert!(matches!(
            AudioBuffer::new(too_many, 24_000),
            Err(AudioError::Shape(ShapeError::InvalidChannels { channels: 65_536 }))
        ));

        let widest = AudioBuffer::new(Array2::<f32>::zeros((usize::from(u16::MAX), 0)), 8_000);
        assert_eq!(widest.unwrap().spec(), PcmSpec::new(8_000, u16::MAX).unwrap());
    }

    #[test]
    fn test_silent_allocation() {
        let spec = PcmSpec::new(16_000, 2).unwrap();
        let buffer = AudioBuffer::<f64>::silent(spec, 10);
        assert_eq!(buffer.num_channels(), 2);
        assert_eq!(buffer.frame_count(), 10);
        assert_eq!(buffer.spec(), spec);
        assert!(buffer.data().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_from_channels() {
        let buffer = AudioBuffer::from_channels(vec![vec![0.1f32, 0.2], vec![0.3, 0.4]], 8_000)
            .unwrap();
        assert_eq!(buffer.channel(1).unwrap().to_vec(), vec![0.3, 0.4]);

        let ragged = AudioBuffer::from_channels(vec![vec![0.1f32, 0.2], vec![0.3]], 8_000);
        assert_eq!(
            ragged,
            Err(AudioError::Shape(ShapeError::RaggedChannels {
                channel: 1,
                expected: 2,
                actual: 1
            }))
        );

        assert!(AudioBuffer::<f32>::from_channels(Vec::new(), 8_000).is_err());
    }

    #[test]
    fn test_channel_out_of_range() {
        let buffer = AudioBuffer::new(array![[0.0f32, 0.5]], 24_000).unwrap();
        assert!(matches!(
            buffer.channel(1),
            Err(AudioError::Shape(ShapeError::ChannelOutOfRange {
                index: 1,
                channels: 1
            }))
        ));
    }

    #[test]
    fn test_duration_and_peak() {
        let buffer = AudioBuffer::new(array![[0.25f32, -0.75, 0.5, 0.0]], 4).unwrap();
        assert_approx_eq!(buffer.duration_seconds(), 1.0, 1e-12);
        assert_eq!(buffer.duration(), Duration::from_secs(1));
        assert_eq!(buffer.peak(), 0.75);

        let empty = AudioBuffer::<f32>::silent(PcmSpec::TTS, 0);
        assert!(empty.is_empty());
        assert_eq!(empty.peak(), 0.0);
    }

    #[test]
    fn test_pcm_bytes_are_interleaved_little_endian() {
        let buffer = AudioBuffer::new(
            array![
                [0.0f32, -1.0], // left
                [1.0f32, -0.5], // right
            ],
            24_000,
        )
        .unwrap();

        let bytes = buffer.to_pcm_bytes().unwrap();
        assert_eq!(buffer.pcm_byte_len(), 8);
        assert_eq!(
            bytes,
            vec![
                0x00, 0x00, // L0 = 0
                0xFF, 0x7F, // R0 = 32767
                0x00, 0x80, // L1 = -32768
                0x00, 0xC0, // R1 = -16384
            ]
        );
    }
}
