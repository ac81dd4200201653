//! Error types for the visualizer.

use arbor_scene::Toast;
use arbor_structures::UnknownKind;
use thiserror::Error;

/// Result type for visualizer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the algorithms themselves.
#[derive(Debug, Error)]
pub enum Error {
    /// A new operation arrived while a storyboard is still playing
    #[error("Animation in progress")]
    AnimationInProgress,

    /// Structure kind not recognised
    #[error(transparent)]
    UnknownStructure(#[from] UnknownKind),

    /// Malformed environment setting
    #[error("Invalid config {name}={value:?}: {reason}")]
    InvalidConfig {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The notice shown to the user for this error.
    pub fn toast(&self) -> Toast {
        match self {
            Error::AnimationInProgress => Toast::error(
                "Animation in progress",
                "Please wait for the current animation to finish.",
            ),
            other => Toast::error("Error", other.to_string()),
        }
    }
}
