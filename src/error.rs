//! Error types for the overlay player
use std::path::PathBuf;
use thiserror::Error;

/// Player errors
#[derive(Error, Debug)]
pub enum PlayerError {
    /// The platform refused to enter or leave fullscreen
    #[error("Fullscreen request denied")]
    FullscreenDenied,

    /// Media file could not be opened
    #[error("Failed to open media {path:?}: {source}")]
    OpenMedia {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No audio output device available
    #[error("Audio output error: {0}")]
    AudioOutput(String),

    /// Media could not be decoded by the element
    #[error("Decode error: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    /// Invalid configuration file
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rodio::StreamError> for PlayerError {
    fn from(err: rodio::StreamError) -> Self {
        PlayerError::AudioOutput(err.to_string())
    }
}

impl From<rodio::PlayError> for PlayerError {
    fn from(err: rodio::PlayError) -> Self {
        PlayerError::AudioOutput(err.to_string())
    }
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
