//! Parallel rendering of scene narration.
//!
//! Scenes share nothing, so they are simply fanned out over rayon's pool.

use super::{BatchError, BatchResult, ErrorHandling, collect_outcomes};
use crate::{AudioResult, PcmSpec, Scene, SceneAudio};
use rayon::prelude::*;

/// Parallel renderer for the narration of many scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelRenderer {
    spec: PcmSpec,
    thread_count: Option<usize>,
}

impl ParallelRenderer {
    /// Renderer using rayon's global pool.
    pub const fn new(spec: PcmSpec) -> Self {
        Self {
            spec,
            thread_count: None,
        }
    }

    /// Use a dedicated pool of `threads` threads. `0` means one per CPU.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.thread_count = Some(if threads == 0 { num_cpus::get() } else { threads });
        self
    }

    /// Render every scene, keeping each scene's outcome in scene order.
    ///
    /// # Errors
    /// [`BatchError::ParallelError`] if a dedicated thread pool cannot be created.
    pub fn render(&self, scenes: &[Scene]) -> BatchResult<Vec<AudioResult<Option<SceneAudio>>>> {
        let spec = self.spec;
        let work = || {
            scenes
                .par_iter()
                .map(|scene| scene.narration_audio(spec))
                .collect::<Vec<_>>()
        };

        match self.thread_count {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| {
                        BatchError::parallel_error(format!("Thread pool creation failed: {}", e))
                    })?;
                tracing::debug!(threads, scenes = scenes.len(), "rendering on dedicated pool");
                Ok(pool.install(work))
            }
            None => Ok(work()),
        }
    }

    /// Render every scene and fold the outcomes according to `handling`.
    ///
    /// # Errors
    /// As [`try_render_scene_audio`](super::try_render_scene_audio), plus
    /// [`BatchError::ParallelError`].
    pub fn try_render(
        &self,
        scenes: &[Scene],
        handling: ErrorHandling,
    ) -> BatchResult<Vec<Option<SceneAudio>>> {
        collect_outcomes(self.render(scenes)?, handling)
    }
}
