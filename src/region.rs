use serde::{Deserialize, Serialize};

use crate::error::{Result, TrimError};

/// Start/end of the default region seeded for every newly loaded file.
pub const DEFAULT_REGION_START: f64 = 0.0;
pub const DEFAULT_REGION_END: f64 = 15.0;

/// Fill color the waveform surface uses for the seeded region.
pub const DEFAULT_REGION_COLOR: &str = "rgba(98, 86, 202, .5)";

/// A validated half-open time interval `[start, end)` in seconds
///
/// Used both for visual highlighting on the waveform and as the
/// trim/export boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    /// Start time in seconds (must be >= 0)
    pub start: f64,

    /// End time in seconds (must be > start)
    pub end: f64,
}

impl RegionBounds {
    /// Create new region bounds with validation
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if start < 0.0 {
            return Err(TrimError::InvalidRegion(format!(
                "Start time cannot be negative: {}",
                start
            )));
        }

        if end <= start {
            return Err(TrimError::InvalidRegion(format!(
                "End time ({}) must be greater than start time ({})",
                end, start
            )));
        }

        Ok(Self { start, end })
    }

    /// Duration of the interval in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether a playback position has reached or passed the end bound
    pub fn is_past_end(&self, time_seconds: f64) -> bool {
        time_seconds >= self.end
    }
}

/// Who created a region
///
/// Replaces the original sentinel-integer convention: a seeded region
/// carried one magic value, user-drawn regions another, and an untagged
/// region was a fresh gesture from the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionOrigin {
    /// The single default region installed when a file loads
    Seeded,
    /// A region the user drew or resized on the waveform
    UserDrawn,
}

/// A labeled time interval over the loaded audio
///
/// Mirrors the region objects the waveform surface itself keeps; the
/// `origin` tag is `None` until selection state registers the region,
/// which is how echoed create events are told apart from fresh ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub bounds: RegionBounds,
    pub color: String,
    pub origin: Option<RegionOrigin>,
}

impl Region {
    /// A region as handed over by the surface's drag gesture: not yet tagged
    pub fn user_gesture(id: impl Into<String>, bounds: RegionBounds) -> Self {
        Self {
            id: id.into(),
            bounds,
            color: DEFAULT_REGION_COLOR.to_string(),
            origin: None,
        }
    }

    /// The default region seeded once per loaded file: `[0, 15)`
    pub fn seeded_default() -> Self {
        Self {
            id: "region-1".to_string(),
            bounds: RegionBounds {
                start: DEFAULT_REGION_START,
                end: DEFAULT_REGION_END,
            },
            color: DEFAULT_REGION_COLOR.to_string(),
            origin: Some(RegionOrigin::Seeded),
        }
    }
}
