// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)] // Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![deny(missing_docs)] // Documentation is a must for release
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! # SceneAudio
//!
//! Turns the narration returned by a text-to-speech service into playable audio.
//!
//! The service answers with raw 16-bit little-endian PCM (24 kHz mono) wrapped in base64.
//! This crate decodes that payload into a per-channel floating-point [`AudioBuffer`] and
//! re-encodes the buffer as a canonical 44-byte-header WAVE file that any player accepts.
//!
//! ```text
//! base64 string ──decode_base64──▶ bytes ──decode_pcm──▶ AudioBuffer ──encode_wav──▶ WAVE bytes
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_audio::{decode_pcm_base64, encode_wav, PcmSpec};
//!
//! # fn main() -> Result<(), scene_audio::AudioError> {
//! let audio = decode_pcm_base64::<f32>("AAD//w==", PcmSpec::TTS)?;
//! assert_eq!(audio.frame_count(), 2);
//!
//! let wav = encode_wav(&audio)?;
//! assert_eq!(&wav[0..4], b"RIFF");
//! assert_eq!(wav.len(), 44 + 4);
//! # Ok(())
//! # }
//! ```
//!
//! ## Sample Scaling
//!
//! Decoding divides by 32768; encoding clamps to `[-1.0, 1.0]` and multiplies negative
//! samples by 32768 and non-negative samples by 32767. See [`PcmFloat`].
//!
//! ## Features
//!
//! - `batch-processing` (default): render the narration of many [`Scene`]s at once.
//! - `parallel-processing`: the same on rayon, see [`batch::ParallelRenderer`].
//! - `serialization` (default): serde support for [`PcmSpec`], [`Scene`] and
//!   [`ShortsScript`].
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`AudioResult`]. The [`AudioError`] variants wrap a
//! stage-specific error: [`DecodeError`] for the base64 stage, [`ShapeError`] for impossible
//! stream layouts and [`WavError`] for container problems.
//!
//! ## Logging
//!
//! Decode and encode steps emit `tracing` events (`debug` for each stage, `warn` when a
//! trailing partial frame is dropped). No subscriber is installed by the library.

mod config;
mod error;
mod payload;
mod pcm;
mod repr;
mod scene;
mod traits;
mod wav;

#[cfg(feature = "batch-processing")]
pub mod batch;

pub use crate::config::{BITS_PER_SAMPLE, BYTES_PER_SAMPLE, PcmSpec};
pub use crate::error::{AudioError, AudioResult, DecodeError, ShapeError, WavError};
pub use crate::payload::{decode_base64, encode_base64};
pub use crate::pcm::{decode_pcm, decode_pcm_base64};
pub use crate::repr::AudioBuffer;
pub use crate::scene::{Scene, SceneAudio, ShortsScript};
pub use crate::traits::PcmFloat;
pub use crate::wav::{
    WAV_HEADER_LEN, WAV_MIME_TYPE, WavHeader, data_chunk, decode_wav, encode_wav,
    tts_base64_to_wav,
};

#[cfg(feature = "batch-processing")]
pub use crate::batch::{render_scene_audio, try_render_scene_audio};
