//! Error types for the player core and the audio output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`PlaybackController`](crate::player::PlaybackController) operations.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Navigation or playback was requested with zero tracks.
    #[error("track list is empty")]
    EmptyPlaylist,

    /// A controller was built without an audio output.
    #[error("no audio output bound")]
    NoOutputBound,

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Failures reported by an [`AudioOutput`](crate::player::AudioOutput).
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("audio device unavailable: {0}")]
    Device(String),

    #[error("failed to open {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    /// `play()` was called before any track was loaded.
    #[error("no track loaded")]
    NothingLoaded,
}

pub type Result<T> = std::result::Result<T, PlayerError>;
