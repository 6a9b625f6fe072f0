//! Canonical 16-bit PCM WAVE containers.
//!
//! Files written here always have exactly three chunks (`RIFF`/`WAVE`, `fmt `, `data`)
//! and a 44-byte header:
//!
//! | offset | size | field                                   |
//! |-------:|-----:|-----------------------------------------|
//! | 0      | 4    | `"RIFF"`                                |
//! | 4      | 4    | chunk size = 36 + data size             |
//! | 8      | 4    | `"WAVE"`                                |
//! | 12     | 4    | `"fmt "`                                |
//! | 16     | 4    | 16                                      |
//! | 20     | 2    | 1 (PCM)                                 |
//! | 22     | 2    | channels                                |
//! | 24     | 4    | sample rate                             |
//! | 28     | 4    | byte rate = sample rate * channels * 2  |
//! | 32     | 2    | block align = channels * 2              |
//! | 34     | 2    | 16 (bits per sample)                    |
//! | 36     | 4    | `"data"`                                |
//! | 40     | 4    | data size = frames * channels * 2       |
//!
//! All integers are little-endian. Reading goes through `hound`, so any RIFF/WAVE file
//! holding 16-bit integer samples is accepted, including ones with extra chunks (`LIST`,
//! `fact`, ...) or an extensible `fmt ` chunk.

use std::io::Cursor;

use hound::{SampleFormat, WavReader};
use ndarray::Array2;

use crate::config::{BITS_PER_SAMPLE, BYTES_PER_SAMPLE};
use crate::{AudioBuffer, AudioResult, PcmFloat, PcmSpec, WavError, decode_pcm_base64};

/// Size of the canonical header.
pub const WAV_HEADER_LEN: usize = 44;
/// MIME type for wrapping encoded output as a blob or HTTP body.
pub const WAV_MIME_TYPE: &str = "audio/wav";

const RIFF: &[u8; 4] = b"RIFF";
const WAVE: &[u8; 4] = b"WAVE";
const FMT: &[u8; 4] = b"fmt ";
const DATA: &[u8; 4] = b"data";
const FMT_CHUNK_LEN: u32 = 16;
const FORMAT_PCM: u16 = 1;
const FORMAT_IEEE_FLOAT: u16 = 3;
/// Bytes of the RIFF chunk that precede the data payload, after the size field.
const RIFF_OVERHEAD: u32 = 36;

/// Fields of the canonical 44-byte header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Interleaved channels.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Size in bytes of the `data` payload.
    pub data_len: u32,
}

impl WavHeader {
    /// Header describing `frames` frames of a `spec` stream.
    ///
    /// # Errors
    /// [`WavError::FieldOverflow`] if the data or RIFF size does not fit in 32 bits, or the
    /// channel count is too large for the 16-bit block align field.
    pub fn new(spec: PcmSpec, frames: usize) -> AudioResult<Self> {
        let data_len = (frames as u64)
            .checked_mul(spec.block_align() as u64)
            .ok_or(WavError::field_overflow("data size", u64::MAX))?;
        if data_len > u64::from(u32::MAX - RIFF_OVERHEAD) {
            let chunk_size = data_len + u64::from(RIFF_OVERHEAD);
            return Err(WavError::field_overflow("chunk size", chunk_size).into());
        }
        if spec.block_align() > usize::from(u16::MAX) {
            return Err(WavError::field_overflow("block align", spec.block_align() as u64).into());
        }
        if spec.byte_rate() > u64::from(u32::MAX) {
            return Err(WavError::field_overflow("byte rate", spec.byte_rate()).into());
        }

        Ok(Self {
            channels: spec.channels(),
            sample_rate: spec.sample_rate(),
            data_len: data_len as u32,
        })
    }

    /// Header for the payload of `buffer`.
    ///
    /// # Errors
    /// As [`WavHeader::new`].
    pub fn for_buffer<T: PcmFloat>(buffer: &AudioBuffer<T>) -> AudioResult<Self> {
        Self::new(buffer.spec(), buffer.frame_count())
    }

    /// RIFF chunk size (`36 + data_len`).
    pub const fn chunk_size(&self) -> u32 {
        RIFF_OVERHEAD.saturating_add(self.data_len)
    }

    /// Bytes per frame.
    pub const fn block_align(&self) -> u16 {
        self.channels.saturating_mul(BYTES_PER_SAMPLE as u16)
    }

    /// Bytes per second.
    pub const fn byte_rate(&self) -> u32 {
        self.sample_rate.saturating_mul(self.block_align() as u32)
    }

    /// Total file length including the header.
    pub const fn file_len(&self) -> usize {
        WAV_HEADER_LEN + self.data_len as usize
    }

    /// Stream layout described by this header.
    ///
    /// # Errors
    /// [`ShapeError`](crate::ShapeError) for a zero sample rate or channel count.
    pub fn spec(&self) -> AudioResult<PcmSpec> {
        PcmSpec::new(self.sample_rate, self.channels)
    }

    /// Serialise to the 44 header bytes.
    pub fn to_bytes(&self) -> [u8; WAV_HEADER_LEN] {
        let mut out = [0u8; WAV_HEADER_LEN];
        out[0..4].copy_from_slice(RIFF);
        out[4..8].copy_from_slice(&self.chunk_size().to_le_bytes());
        out[8..12].copy_from_slice(WAVE);

        out[12..16].copy_from_slice(FMT);
        out[16..20].copy_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
        out[20..22].copy_from_slice(&FORMAT_PCM.to_le_bytes());
        out[22..24].copy_from_slice(&self.channels.to_le_bytes());
        out[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&self.byte_rate().to_le_bytes());
        out[32..34].copy_from_slice(&self.block_align().to_le_bytes());
        out[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

        out[36..40].copy_from_slice(DATA);
        out[40..44].copy_from_slice(&self.data_len.to_le_bytes());
        out
    }

    /// Read the stream layout and data size of a WAVE file.
    ///
    /// # Errors
    /// [`WavError::Malformed`] if `bytes` is not a RIFF/WAVE file,
    /// [`WavError::UnsupportedEncoding`] for anything other than 16-bit integer PCM.
    pub fn parse(bytes: &[u8]) -> AudioResult<Self> {
        open(bytes).map(|(header, _)| header)
    }
}

fn open(bytes: &[u8]) -> AudioResult<(WavHeader, WavReader<Cursor<&[u8]>>)> {
    let reader = WavReader::new(Cursor::new(bytes)).map_err(WavError::from)?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        let format_tag = match spec.sample_format {
            SampleFormat::Int => FORMAT_PCM,
            SampleFormat::Float => FORMAT_IEEE_FLOAT,
        };
        return Err(WavError::UnsupportedEncoding {
            format_tag,
            bits_per_sample: spec.bits_per_sample,
        }
        .into());
    }

    let header = WavHeader {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        data_len: reader.len().saturating_mul(BYTES_PER_SAMPLE as u32),
    };
    tracing::trace!(?header, "parsed WAV header");
    Ok((header, reader))
}

/// Serialise `buffer` as a canonical 16-bit PCM WAVE file.
///
/// Samples are clamped to `[-1.0, 1.0]`; non-negative values are scaled by 32767 and
/// negative values by 32768 before rounding. The output is always
/// `44 + frames * channels * 2` bytes long.
///
/// # Errors
/// [`WavError::FieldOverflow`] if the payload is too large for a RIFF file (4 GiB).
///
/// ```rust
/// use scene_audio::{decode_pcm, encode_wav, PcmSpec};
///
/// let audio = decode_pcm::<f32>(&[0x00, 0x00, 0xFF, 0xFF], PcmSpec::TTS).unwrap();
/// let wav = encode_wav(&audio).unwrap();
/// assert_eq!(wav.len(), 48);
/// assert_eq!(&wav[44..], &[0x00, 0x00, 0xFF, 0xFF]);
/// ```
pub fn encode_wav<T: PcmFloat>(buffer: &AudioBuffer<T>) -> AudioResult<Vec<u8>> {
    let header = WavHeader::for_buffer(buffer)?;

    let mut out = Vec::with_capacity(header.file_len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(&buffer.to_pcm_bytes()?);

    tracing::debug!(
        sample_rate = header.sample_rate,
        channels = header.channels,
        frames = buffer.frame_count(),
        bytes = out.len(),
        "encoded WAV"
    );
    Ok(out)
}

/// The `data` payload of a WAVE file, exactly `data_len` bytes long.
///
/// # Errors
/// As [`WavHeader::parse`], plus [`WavError::Truncated`] if the file ends early.
pub fn data_chunk(bytes: &[u8]) -> AudioResult<&[u8]> {
    let (header, reader) = open(bytes)?;
    let start = reader.into_inner().position() as usize;
    let end = start + header.data_len as usize;
    bytes
        .get(start..end)
        .ok_or_else(|| WavError::truncated(end, bytes.len()).into())
}

/// Read a 16-bit PCM WAVE file back into an [`AudioBuffer`].
///
/// # Errors
/// As [`WavHeader::parse`], [`WavError::Malformed`] if the samples end early, and
/// [`ShapeError`](crate::ShapeError) for a zero sample rate.
pub fn decode_wav<T: PcmFloat>(bytes: &[u8]) -> AudioResult<AudioBuffer<T>> {
    let (header, mut reader) = open(bytes)?;
    let spec = header.spec()?;
    let samples = reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(WavError::from)?;

    let channels = usize::from(spec.channels());
    let frames = samples.len() / channels;
    let data = Array2::from_shape_fn((channels, frames), |(channel, frame)| {
        T::from_pcm_i16(samples[frame * channels + channel])
    });

    tracing::debug!(
        sample_rate = spec.sample_rate(),
        channels,
        frames,
        "decoded WAV"
    );
    AudioBuffer::new(data, spec.sample_rate())
}

/// Full narration pipeline: base64 PCM from the text-to-speech service to WAVE bytes.
///
/// # Errors
/// Any error of [`decode_pcm_base64`] or [`encode_wav`].
pub fn tts_base64_to_wav(encoded: &str, spec: PcmSpec) -> AudioResult<Vec<u8>> {
    let audio = decode_pcm_base64::<f32>(encoded, spec)?;
    encode_wav(&audio)
}
