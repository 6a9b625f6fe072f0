use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Floating-point sample type that a 16-bit PCM stream can be decoded into.
///
/// Decoding divides every raw value by 32768, so `i16::MIN` maps exactly to `-1.0` and
/// `i16::MAX` to just under `1.0`. Encoding clamps to `[-1.0, 1.0]` and scales the two
/// halves asymmetrically: non-negative samples by 32767, negative samples by 32768. For
/// every negative value and zero produced by the decoder the round trip is exact; positive
/// values come back within one quantisation step.
///
/// Implemented for `f32` and `f64`.
///
/// ## Example
/// ```rust
/// use scene_audio::PcmFloat;
///
/// let min = f32::from_pcm_i16(i16::MIN);
/// assert_eq!(min, -1.0);
/// assert_eq!(min.to_pcm_i16(), i16::MIN);
/// assert_eq!(1.0f32.to_pcm_i16(), i16::MAX);
/// ```
pub trait PcmFloat:
    Float + FromPrimitive + Default + Debug + Display + Send + Sync + 'static
{
    /// Normalise a raw 16-bit sample to `[-1.0, 1.0)`.
    fn from_pcm_i16(raw: i16) -> Self;

    /// Quantise back to a 16-bit sample. `NaN` becomes silence.
    fn to_pcm_i16(self) -> i16;
}

/// Divisor used for both halves when decoding.
pub(crate) const PCM_DECODE_SCALE: f64 = 32768.0;
/// Scale for non-negative samples when encoding.
pub(crate) const PCM_ENCODE_POSITIVE_SCALE: f64 = 32767.0;
/// Scale for negative samples when encoding.
pub(crate) const PCM_ENCODE_NEGATIVE_SCALE: f64 = 32768.0;

macro_rules! impl_pcm_float {
    ($float:ty) => {
        impl PcmFloat for $float {
            #[inline(always)]
            fn from_pcm_i16(raw: i16) -> Self {
                (raw as $float) / (PCM_DECODE_SCALE as $float)
            }

            #[inline(always)]
            fn to_pcm_i16(self) -> i16 {
                if self.is_nan() {
                    return 0;
                }
                let clamped = self.clamp(-1.0, 1.0);
                // Both products are within i16 range after the clamp.
                if clamped < 0.0 {
                    (clamped * (PCM_ENCODE_NEGATIVE_SCALE as $float)).round() as i16
                } else {
                    (clamped * (PCM_ENCODE_POSITIVE_SCALE as $float)).round() as i16
                }
            }
        }
    };
}

impl_pcm_float!(f32);
impl_pcm_float!(f64);
