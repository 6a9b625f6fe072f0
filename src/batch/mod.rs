//! Rendering narration audio for many scenes at once.
//!
//! Every scene is decoded and encoded on its own: there is no shared state between
//! scenes, and one scene's bad payload never prevents the others from rendering. What a
//! failure means for the batch as a whole is chosen with [`ErrorHandling`].

mod error;
#[cfg(feature = "parallel-processing")]
mod parallel;

pub use error::{BatchError, BatchResult, ErrorHandling};
#[cfg(feature = "parallel-processing")]
pub use parallel::ParallelRenderer;

use crate::{AudioResult, PcmSpec, Scene, SceneAudio};

/// Render every scene independently, keeping each scene's outcome.
///
/// The output has one entry per scene, in scene order. `Ok(None)` marks a scene that has
/// no narration audio attached.
pub fn render_scene_audio(scenes: &[Scene], spec: PcmSpec) -> Vec<AudioResult<Option<SceneAudio>>> {
    scenes
        .iter()
        .map(|scene| scene.narration_audio(spec))
        .collect()
}

/// Render every scene and fold the outcomes according to `handling`.
///
/// # Errors
/// - [`ErrorHandling::StopOnFirstError`]: [`BatchError::ItemError`] for the first failure.
/// - [`ErrorHandling::CollectErrors`]: [`BatchError::MultipleErrors`] listing all failures.
/// - [`ErrorHandling::IgnoreErrors`]: never fails.
pub fn try_render_scene_audio(
    scenes: &[Scene],
    spec: PcmSpec,
    handling: ErrorHandling,
) -> BatchResult<Vec<Option<SceneAudio>>> {
    if handling == ErrorHandling::StopOnFirstError {
        return scenes
            .iter()
            .enumerate()
            .map(|(index, scene)| {
                scene
                    .narration_audio(spec)
                    .map_err(|e| BatchError::item_error(index, e))
            })
            .collect();
    }
    collect_outcomes(render_scene_audio(scenes, spec), handling)
}

/// Fold per-scene outcomes into a batch result.
pub(crate) fn collect_outcomes(
    outcomes: Vec<AudioResult<Option<SceneAudio>>>,
    handling: ErrorHandling,
) -> BatchResult<Vec<Option<SceneAudio>>> {
    let mut rendered = Vec::with_capacity(outcomes.len());
    let mut errors = Vec::new();

    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(audio) => rendered.push(audio),
            Err(e) => {
                tracing::warn!(scene = index, error = %e, "scene narration failed");
                match handling {
                    ErrorHandling::StopOnFirstError => {
                        return Err(BatchError::item_error(index, e));
                    }
                    ErrorHandling::CollectErrors => errors.push((index, e)),
                    ErrorHandling::IgnoreErrors => {}
                }
                rendered.push(None);
            }
        }
    }

    if errors.is_empty() {
        Ok(rendered)
    } else {
        Err(BatchError::multiple_errors(errors))
    }
}
