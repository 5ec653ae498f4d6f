use serde::{Deserialize, Serialize};

/// Represents decoded audio data in memory as PCM samples
///
/// Samples are stored interleaved: [L, R, L, R, ...] for stereo
/// or [M, M, M, ...] for mono, where each sample is a 32-bit float
/// in the range [-1.0, 1.0]
#[derive(Debug, Clone)]
pub struct AudioData {
    /// PCM audio samples as 32-bit floats, interleaved by channel
    pub samples: Vec<f32>,

    /// Sample rate in Hz (e.g., 44100, 48000)
    pub sample_rate: u32,

    /// Number of audio channels (1 = mono, 2 = stereo)
    pub channels: u16,
}

impl AudioData {
    /// Total duration of the audio in seconds
    pub fn duration_seconds(&self) -> f64 {
        let total_frames = self.samples.len() as f64 / self.channels as f64;
        total_frames / self.sample_rate as f64
    }

    /// Number of audio frames (one sample per channel)
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels as usize
    }
}

/// Metadata about an audio file without loading all samples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioInfo {
    /// Total duration in seconds
    pub duration_seconds: f64,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels
    pub channels: u16,

    /// Audio format/codec name (e.g., "MP3", "FLAC", "Vorbis")
    pub format: String,

    /// Bit depth if available (e.g., 16, 24)
    pub bit_depth: Option<u16>,
}
