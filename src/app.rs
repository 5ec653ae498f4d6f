//! Top-level application state: loaded audio, readiness flags, and the
//! wiring between surface events, selection, playback bounds, and export.

use crate::engine::Engine;
use crate::error::{Result, TrimError};
use crate::export::{self, ExportArtifact};
use crate::playback::{PlaybackBounds, PlaybackControl};
use crate::region::Region;
use crate::selection::{Created, SelectionState};

/// The user's original file: raw bytes plus its display name.
#[derive(Debug, Clone)]
pub struct LoadedAudio {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Events the waveform surface emits.
#[derive(Debug, Clone)]
pub enum SurfaceEvent {
    /// The surface finished rendering the loaded file.
    Ready,
    /// A region annotation appeared (user drag, or an echo of one we added).
    RegionCreated(Region),
    /// A drag/resize gesture on a region finished.
    RegionUpdateEnd(Region),
    /// Periodic playback position report, in elapsed seconds.
    PositionTick(f64),
}

/// The whole application's own state. Everything else - rendering, gestures,
/// codec work - lives behind the [`PlaybackControl`] and [`Engine`] seams.
#[derive(Debug)]
pub struct TrimApp {
    audio: Option<LoadedAudio>,
    surface_ready: bool,
    is_playing: bool,
    selection: SelectionState,
    bounds: PlaybackBounds,
}

impl Default for TrimApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TrimApp {
    /// App with no file loaded yet.
    pub fn new() -> Self {
        Self {
            audio: None,
            surface_ready: false,
            is_playing: false,
            selection: SelectionState::empty(),
            bounds: PlaybackBounds::new(),
        }
    }

    /// Load a new file: resets the surface-ready flag, seeds the default
    /// region, and binds playback to it.
    pub fn load_file(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        let name = name.into();
        tracing::info!(file = %name, bytes = bytes.len(), "Audio file loaded");

        self.audio = Some(LoadedAudio { name, bytes });
        self.surface_ready = false;
        self.is_playing = false;
        self.selection = SelectionState::for_new_file();

        if let Some(bounds) = self.selection.active_bounds() {
            self.bounds.rebind(bounds);
        }
    }

    /// Dispatch one surface event.
    pub fn handle_event<P: PlaybackControl>(&mut self, event: SurfaceEvent, control: &mut P) {
        match event {
            SurfaceEvent::Ready => {
                self.surface_ready = true;
                // The surface autoplays once rendering finishes
                self.is_playing = true;
            }
            SurfaceEvent::RegionCreated(region) => {
                if self.selection.on_region_created(region) == Created::Registered {
                    if let Some(bounds) = self.selection.active_bounds() {
                        self.bounds.rebind(bounds);
                    }
                }
            }
            SurfaceEvent::RegionUpdateEnd(region) => {
                self.selection.on_region_updated(&region);
                self.bounds.rebind(region.bounds);

                // Jump to the edited region and audition it right away
                control.seek_to(region.bounds.start);
                control.play();
                self.is_playing = true;
            }
            SurfaceEvent::PositionTick(time) => {
                if self.bounds.enforce(time, control) {
                    self.is_playing = false;
                }
            }
        }
    }

    /// The play/pause button: an unguarded two-state flip.
    pub fn toggle_play<P: PlaybackControl>(&mut self, control: &mut P) {
        control.play_pause();
        self.is_playing = !self.is_playing;
    }

    /// Export the active region as a trimmed artifact.
    pub async fn export(&self, engine: &Engine) -> Result<ExportArtifact> {
        let audio = self.audio.as_ref().ok_or(TrimError::NoAudioLoaded)?;
        let bounds = self
            .selection
            .active_bounds()
            .ok_or_else(|| TrimError::InvalidRegion("No active region selected".to_string()))?;

        export::export_region(engine, audio.bytes.clone(), bounds).await
    }

    pub fn audio(&self) -> Option<&LoadedAudio> {
        self.audio.as_ref()
    }

    pub fn surface_ready(&self) -> bool {
        self.surface_ready
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn bounds(&self) -> &PlaybackBounds {
        &self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::RecordingTranscoder;
    use crate::region::{Region, RegionBounds};

    #[derive(Default)]
    struct MockControl {
        seeks: Vec<f64>,
        pauses: usize,
        plays: usize,
        toggles: usize,
    }

    impl PlaybackControl for MockControl {
        fn seek_to(&mut self, seconds: f64) {
            self.seeks.push(seconds);
        }
        fn pause(&mut self) {
            self.pauses += 1;
        }
        fn play(&mut self) {
            self.plays += 1;
        }
        fn play_pause(&mut self) {
            self.toggles += 1;
        }
    }

    fn loaded_app() -> TrimApp {
        let mut app = TrimApp::new();
        app.load_file("song.mp3", vec![0; 256]);
        app
    }

    fn region(id: &str, start: f64, end: f64) -> Region {
        Region::user_gesture(id, RegionBounds::new(start, end).unwrap())
    }

    #[test]
    fn load_seeds_default_region_and_binds_playback() {
        let app = loaded_app();
        assert_eq!(app.selection().regions().len(), 1);
        assert!(!app.surface_ready());

        let bounds = app.bounds().bounds().unwrap();
        assert_eq!(bounds.start, 0.0);
        assert_eq!(bounds.end, 15.0);
    }

    #[test]
    fn ready_event_marks_surface_and_autoplays() {
        let mut app = loaded_app();
        let mut control = MockControl::default();
        app.handle_event(SurfaceEvent::Ready, &mut control);
        assert!(app.surface_ready());
        assert!(app.is_playing());
    }

    #[test]
    fn update_end_rebinds_seeks_and_plays() {
        let mut app = loaded_app();
        let mut control = MockControl::default();

        app.handle_event(SurfaceEvent::RegionUpdateEnd(region("region-1", 2.0, 5.0)), &mut control);

        assert_eq!(control.seeks, vec![2.0]);
        assert_eq!(control.plays, 1);
        assert!(app.is_playing());
        assert_eq!(app.bounds().bounds().unwrap().end, 5.0);
    }

    #[test]
    fn tick_past_region_end_pauses_at_region_start() {
        let mut app = loaded_app();
        let mut control = MockControl::default();
        app.handle_event(SurfaceEvent::RegionUpdateEnd(region("region-1", 2.0, 5.0)), &mut control);

        app.handle_event(SurfaceEvent::PositionTick(4.99), &mut control);
        assert_eq!(control.pauses, 0);

        app.handle_event(SurfaceEvent::PositionTick(5.01), &mut control);
        assert_eq!(control.pauses, 1);
        assert_eq!(control.seeks.last(), Some(&2.0));
        assert!(!app.is_playing());
    }

    #[test]
    fn region_edit_drops_stale_bounds() {
        let mut app = loaded_app();
        let mut control = MockControl::default();
        app.handle_event(SurfaceEvent::RegionUpdateEnd(region("region-1", 2.0, 5.0)), &mut control);
        app.handle_event(SurfaceEvent::RegionUpdateEnd(region("region-1", 10.0, 12.0)), &mut control);

        // The old [2, 5) rule must not fire
        app.handle_event(SurfaceEvent::PositionTick(6.0), &mut control);
        assert_eq!(control.pauses, 0);

        app.handle_event(SurfaceEvent::PositionTick(12.01), &mut control);
        assert_eq!(control.pauses, 1);
        assert_eq!(control.seeks.last(), Some(&10.0));
    }

    #[test]
    fn created_region_becomes_the_enforced_bound() {
        let mut app = loaded_app();
        let mut control = MockControl::default();

        app.handle_event(SurfaceEvent::RegionCreated(region("region-2", 4.0, 9.0)), &mut control);

        assert_eq!(app.selection().regions().len(), 2);
        let bounds = app.bounds().bounds().unwrap();
        assert_eq!(bounds.start, 4.0);
        assert_eq!(bounds.end, 9.0);
    }

    #[test]
    fn echoed_create_leaves_bounds_alone() {
        let mut app = loaded_app();
        let mut control = MockControl::default();

        app.handle_event(
            SurfaceEvent::RegionCreated(crate::region::Region::seeded_default()),
            &mut control,
        );

        assert_eq!(app.selection().regions().len(), 1);
        assert_eq!(app.bounds().bounds().unwrap().end, 15.0);
    }

    #[test]
    fn toggle_flips_play_state() {
        let mut app = loaded_app();
        let mut control = MockControl::default();

        app.toggle_play(&mut control);
        assert!(app.is_playing());
        app.toggle_play(&mut control);
        assert!(!app.is_playing());
        assert_eq!(control.toggles, 2);
    }

    #[tokio::test]
    async fn export_without_loaded_file_fails() {
        let app = TrimApp::new();
        let engine = Engine::new(RecordingTranscoder::new(vec![1]));
        engine.init().await.unwrap();

        let result = app.export(&engine).await;
        assert!(matches!(result, Err(TrimError::NoAudioLoaded)));
    }

    #[tokio::test]
    async fn export_uses_active_region_bounds() {
        let transcoder = RecordingTranscoder::new(vec![5; 32]);
        let calls = transcoder.call_log();
        let engine = Engine::new(transcoder);
        engine.init().await.unwrap();

        let mut app = loaded_app();
        let mut control = MockControl::default();
        app.handle_event(SurfaceEvent::RegionUpdateEnd(region("region-1", 3.0, 8.0)), &mut control);

        let artifact = app.export(&engine).await.unwrap();
        assert_eq!(artifact.file_name, "output.mp3");

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].2, 3.0);
        assert_eq!(calls[0].3, 8.0);
    }
}
