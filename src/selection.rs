//! Region selection state: the ordered region list plus the single active region.

use crate::region::{Region, RegionBounds, RegionOrigin};

/// Outcome of feeding a region-created event into the selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Created {
    /// The region was registered and became the active selection.
    Registered,
    /// The event was an echo of a region we already know about.
    Ignored,
}

/// Tracks every region on the waveform and which one is active.
///
/// The surface allows many regions to exist for display, but playback
/// bounds and export only ever honor one: the most recently created or
/// updated region, held here as an explicit active-region reference.
#[derive(Debug, Clone)]
pub struct SelectionState {
    regions: Vec<Region>,
    active_id: Option<String>,
}

impl SelectionState {
    /// Selection state for a newly loaded file, seeded with the single
    /// default region `[0, 15)`.
    pub fn for_new_file() -> Self {
        let seeded = Region::seeded_default();
        let active_id = Some(seeded.id.clone());
        Self {
            regions: vec![seeded],
            active_id,
        }
    }

    /// Empty selection state with no regions and nothing active.
    pub fn empty() -> Self {
        Self {
            regions: Vec::new(),
            active_id: None,
        }
    }

    /// Handle a region-created event from the surface.
    ///
    /// The surface echoes back regions we installed ourselves (the seeded
    /// default, and any region re-registered after an edit). Those arrive
    /// already carrying an origin tag and are ignored; only untagged
    /// regions are fresh user gestures.
    pub fn on_region_created(&mut self, mut region: Region) -> Created {
        if region.origin.is_some() {
            tracing::debug!(id = %region.id, "Ignoring echoed region-created event");
            return Created::Ignored;
        }

        region.origin = Some(RegionOrigin::UserDrawn);
        self.active_id = Some(region.id.clone());
        self.regions.push(region);
        Created::Registered
    }

    /// Handle a region-update-end event: the edited region becomes the
    /// active selection and its stored bounds are replaced.
    pub fn on_region_updated(&mut self, region: &Region) {
        if let Some(existing) = self.regions.iter_mut().find(|r| r.id == region.id) {
            existing.bounds = region.bounds;
        }
        self.active_id = Some(region.id.clone());
        tracing::debug!(
            id = %region.id,
            start = region.bounds.start,
            end = region.bounds.end,
            "Active region updated"
        );
    }

    /// The currently active region, if any.
    pub fn active_region(&self) -> Option<&Region> {
        let id = self.active_id.as_deref()?;
        self.regions.iter().find(|r| r.id == id)
    }

    /// Bounds of the active region, if any.
    pub fn active_bounds(&self) -> Option<RegionBounds> {
        self.active_region().map(|r| r.bounds)
    }

    /// All regions in creation order, for display.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }
}
