use thiserror::Error;

/// All possible errors that can occur while trimming and exporting audio
#[derive(Debug, Error)]
pub enum TrimError {
    /// Export was requested before the transcoding engine finished loading
    #[error("Transcoding engine is not loaded")]
    EngineNotReady,

    /// A transcode was already in flight; only one may run at a time
    #[error("Transcoding engine is busy with another job")]
    EngineBusy,

    /// Export was requested with no audio file loaded
    #[error("No audio file loaded")]
    NoAudioLoaded,

    /// A virtual-storage entry the command referred to does not exist
    #[error("No such file in engine storage: '{0}'")]
    MissingVirtualFile(String),

    /// The engine could not parse the command argument vector
    #[error("Bad engine command: {0}")]
    BadCommand(String),

    /// Invalid region bounds (e.g., start >= end, negative values)
    #[error("Invalid region bounds: {0}")]
    InvalidRegion(String),

    /// Region lies outside the audio file's duration
    #[error("Region ({start}s to {end}s) exceeds audio duration ({duration}s)")]
    RegionOutOfBounds {
        start: f64,
        end: f64,
        duration: f64,
    },

    /// Failed to open or read the audio file from disk
    #[error("Failed to open audio file '{path}': {source}")]
    FileOpen {
        path: String,
        source: std::io::Error,
    },

    /// A background worker running codec work panicked or was cancelled
    #[error("Transcode task failed: {0}")]
    TaskFailed(String),

    /// Error occurred while decoding the audio data
    #[error("Audio decoding failed: {0}")]
    DecodeFailed(String),

    /// Error occurred while encoding the trimmed output
    #[error("Audio encoding failed: {0}")]
    EncodeFailed(String),

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from hound WAV encoder
    #[error("Hound WAV error: {0}")]
    Hound(#[from] hound::Error),
}

/// Convenient Result type that uses our TrimError
pub type Result<T> = std::result::Result<T, TrimError>;
