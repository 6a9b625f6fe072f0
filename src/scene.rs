//! Script and scene records that carry narration audio between the generation service and
//! playback.
//!
//! The wire shape matches the JSON script the generation service returns (camelCase keys),
//! extended with the optional assets attached to each scene as they are produced.

use std::time::Duration;

use crate::{AudioResult, PcmSpec, WAV_MIME_TYPE, decode_pcm_base64, encode_base64, encode_wav};

/// A short video script: a title, a visual style and an ordered list of scenes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ShortsScript {
    /// Video title.
    pub title: String,
    /// Style applied to every image prompt.
    pub visual_style: String,
    /// Scenes in playback order.
    pub scenes: Vec<Scene>,
}

/// One scene of a script and the assets generated for it so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Scene {
    /// Prompt for the scene image.
    pub image_prompt: String,
    /// Text read by the narrator.
    pub narration: String,
    /// Description of background sound for the scene.
    pub ambient_sound_prompt: String,
    /// Displayable image location.
    #[cfg_attr(feature = "serialization", serde(default, skip_serializing_if = "Option::is_none"))]
    pub image_url: Option<String>,
    /// Image bytes, base64.
    #[cfg_attr(feature = "serialization", serde(default, skip_serializing_if = "Option::is_none"))]
    pub image_base64: Option<String>,
    /// Playable narration location.
    #[cfg_attr(feature = "serialization", serde(default, skip_serializing_if = "Option::is_none"))]
    pub audio_url: Option<String>,
    /// Raw 16-bit PCM narration, base64.
    #[cfg_attr(feature = "serialization", serde(default, skip_serializing_if = "Option::is_none"))]
    pub audio_base64: Option<String>,
    /// Generated clip location.
    #[cfg_attr(feature = "serialization", serde(default, skip_serializing_if = "Option::is_none"))]
    pub video_url: Option<String>,
    /// The narration text changed after the audio was generated; the audio still plays
    /// but should be synthesised again.
    #[cfg_attr(feature = "serialization", serde(default, skip_serializing_if = "std::ops::Not::not"))]
    pub needs_sync: bool,
}

/// Narration of one scene, ready for playback or download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneAudio {
    /// Canonical WAVE file.
    pub wav: Vec<u8>,
    /// Samples per channel.
    pub frames: usize,
    /// Playback length.
    pub duration: Duration,
}

impl SceneAudio {
    /// MIME type of [`SceneAudio::wav`].
    pub const fn mime_type(&self) -> &'static str {
        WAV_MIME_TYPE
    }
}

impl Scene {
    /// `true` once narration audio has been attached.
    pub fn has_narration_audio(&self) -> bool {
        self.audio_base64.is_some()
    }

    /// Decode the attached narration and encode it as WAVE.
    ///
    /// Returns `Ok(None)` when the scene has no narration audio yet.
    ///
    /// # Errors
    /// Any decode or encode error for this scene's payload.
    pub fn narration_audio(&self, spec: PcmSpec) -> AudioResult<Option<SceneAudio>> {
        let Some(encoded) = self.audio_base64.as_deref() else {
            return Ok(None);
        };

        let audio = decode_pcm_base64::<f32>(encoded, spec)?;
        Ok(Some(SceneAudio {
            wav: encode_wav(&audio)?,
            frames: audio.frame_count(),
            duration: audio.duration(),
        }))
    }

    /// `true` when the narration text was edited after its audio was generated.
    pub const fn needs_sync(&self) -> bool {
        self.needs_sync
    }

    /// Attach freshly synthesised narration, given as a base64 PCM payload.
    ///
    /// Any previous playable location refers to the old narration and is dropped. The
    /// scene is back in sync with its text.
    pub fn set_narration_audio(&mut self, encoded: impl Into<String>) {
        self.audio_base64 = Some(encoded.into());
        self.audio_url = None;
        self.needs_sync = false;
    }

    /// Attach narration given as raw PCM bytes.
    pub fn set_narration_pcm(&mut self, pcm: &[u8]) {
        self.set_narration_audio(encode_base64(pcm));
    }

    /// Replace the narration text.
    ///
    /// Attached audio is kept playable and the scene is flagged with
    /// [`Scene::needs_sync`] until new audio is set.
    pub fn set_narration_text(&mut self, narration: impl Into<String>) {
        self.narration = narration.into();
        self.needs_sync = self.has_narration_audio();
    }

    /// Attach a new image. A clip generated from the previous image is dropped.
    pub fn set_image(&mut self, image_base64: impl Into<String>) {
        let image_base64 = image_base64.into();
        self.image_url = Some(format!("data:image/png;base64,{image_base64}"));
        self.image_base64 = Some(image_base64);
        self.video_url = None;
    }
}

impl ShortsScript {
    /// Total narration length of the scenes that already have audio.
    ///
    /// # Errors
    /// The first scene whose payload fails to decode.
    pub fn narration_duration(&self, spec: PcmSpec) -> AudioResult<Duration> {
        let mut total = Duration::ZERO;
        for scene in &self.scenes {
            if let Some(encoded) = scene.audio_base64.as_deref() {
                total += decode_pcm_base64::<f32>(encoded, spec)?.duration();
            }
        }
        Ok(total)
    }
}
