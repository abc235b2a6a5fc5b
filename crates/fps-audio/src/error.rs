use std::path::PathBuf;

/// Errors that can occur in the audio system.
///
/// A missing mixer or mixer group is not an error: those degrade to the
/// default output with a warning.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("failed to initialize audio backend: {0}")]
    InitFailed(String),

    #[error("failed to load audio file '{0}': {1}")]
    LoadFailed(PathBuf, String),

    #[error("audio playback failed: {0}")]
    PlaybackFailed(String),

    #[error("audio backend resource limit reached: {0}")]
    ResourceLimit(String),

    #[error("invalid mixer config: {0}")]
    InvalidConfig(String),
}
