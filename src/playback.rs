//! Playback-bounds enforcement: loop preview playback inside the active region.

use crate::region::RegionBounds;

/// Seam to the waveform surface's own playback primitives.
///
/// The surface owns decoding and audio output; this crate only tells it
/// when to seek, pause, or flip play state.
pub trait PlaybackControl {
    /// Seek to an absolute position in seconds
    fn seek_to(&mut self, seconds: f64);

    /// Pause playback at the current position
    fn pause(&mut self);

    /// Start or resume playback
    fn play(&mut self);

    /// The surface's own play/pause flip
    fn play_pause(&mut self);
}

/// Action the controller wants performed in response to a position tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickAction {
    /// Seek back to the region start and pause there.
    SeekAndPause { to: f64 },
}

/// Enforcement state: either no bound is installed, or playback is
/// constrained to a region's `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum BoundsState {
    Free,
    Bounded(RegionBounds),
}

/// Constrains playback to the active region.
///
/// Listens to the surface's periodic position tick and, once the tick
/// reaches the region end, seeks back to the region start and pauses.
/// Changing the active region is an explicit `rebind` transition, so a
/// stale bound can never fire after a region edit.
#[derive(Debug, Clone)]
pub struct PlaybackBounds {
    state: BoundsState,
}

impl Default for PlaybackBounds {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackBounds {
    /// New controller with no bound installed.
    pub fn new() -> Self {
        Self {
            state: BoundsState::Free,
        }
    }

    /// Install (or replace) the enforced bounds.
    pub fn rebind(&mut self, bounds: RegionBounds) {
        self.state = BoundsState::Bounded(bounds);
        tracing::debug!(start = bounds.start, end = bounds.end, "Playback bounds rebound");
    }

    /// Remove any enforced bound.
    pub fn release(&mut self) {
        self.state = BoundsState::Free;
    }

    /// The currently enforced bounds, if any.
    pub fn bounds(&self) -> Option<RegionBounds> {
        match self.state {
            BoundsState::Free => None,
            BoundsState::Bounded(b) => Some(b),
        }
    }

    /// Evaluate a position tick against the installed bounds.
    ///
    /// Returns the action to perform, or `None` when playback may continue.
    pub fn on_tick(&self, time_seconds: f64) -> Option<TickAction> {
        match self.state {
            BoundsState::Free => None,
            BoundsState::Bounded(bounds) => {
                if bounds.is_past_end(time_seconds) {
                    Some(TickAction::SeekAndPause { to: bounds.start })
                } else {
                    None
                }
            }
        }
    }

    /// Evaluate a tick and drive the surface directly.
    ///
    /// Returns true if playback was stopped by the bound.
    pub fn enforce<P: PlaybackControl>(&self, time_seconds: f64, control: &mut P) -> bool {
        match self.on_tick(time_seconds) {
            Some(TickAction::SeekAndPause { to }) => {
                control.seek_to(to);
                control.pause();
                true
            }
            None => false,
        }
    }
}
