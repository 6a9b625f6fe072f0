//! Error types for batch rendering of scene narration.

use crate::AudioError;
use thiserror::Error;

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

/// Errors that can occur during batch rendering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// An error occurred while rendering a specific scene.
    #[error("Error processing scene {index}: {source}")]
    ItemError {
        /// Index of the scene that failed.
        index: usize,
        /// The underlying error.
        source: AudioError,
    },

    /// Several scenes failed.
    #[error("Multiple errors occurred during batch processing: {count} errors")]
    MultipleErrors {
        /// Number of failed scenes.
        count: usize,
        /// The individual errors with their scene indices.
        errors: Vec<(usize, AudioError)>,
    },

    /// Parallel processing error.
    #[cfg(feature = "parallel-processing")]
    #[error("Parallel processing error: {message}")]
    ParallelError {
        /// Description of the failure.
        message: String,
    },
}

impl BatchError {
    /// Create a new item error.
    pub const fn item_error(index: usize, source: AudioError) -> Self {
        Self::ItemError { index, source }
    }

    /// Create a new multiple errors error.
    pub fn multiple_errors(errors: Vec<(usize, AudioError)>) -> Self {
        let count = errors.len();
        Self::MultipleErrors { count, errors }
    }

    /// Create a new parallel processing error.
    #[cfg(feature = "parallel-processing")]
    pub fn parallel_error(message: impl Into<String>) -> Self {
        Self::ParallelError {
            message: message.into(),
        }
    }

    /// Indices of the scenes that failed.
    pub fn failed_indices(&self) -> Vec<usize> {
        match self {
            Self::ItemError { index, .. } => vec![*index],
            Self::MultipleErrors { errors, .. } => errors.iter().map(|(index, _)| *index).collect(),
            #[cfg(feature = "parallel-processing")]
            Self::ParallelError { .. } => Vec::new(),
        }
    }
}

/// How a batch reacts to a scene that fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorHandling {
    /// Stop on the first failing scene.
    #[default]
    StopOnFirstError,
    /// Render every scene, then report all failures together.
    CollectErrors,
    /// Render every scene; failed scenes produce no audio.
    IgnoreErrors,
}
