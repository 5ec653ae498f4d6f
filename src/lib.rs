pub mod app;
pub mod audio;
pub mod engine;
pub mod error;
pub mod export;
pub mod playback;
pub mod region;
pub mod selection;

// Re-export for convenience
pub use app::{LoadedAudio, SurfaceEvent, TrimApp};
pub use engine::{Engine, SymphoniaTranscoder, Transcoder};
pub use error::{Result, TrimError};
pub use export::{export_region, ExportArtifact};
pub use playback::{PlaybackBounds, PlaybackControl, TickAction};
pub use region::{Region, RegionBounds, RegionOrigin};
pub use selection::{Created, SelectionState};
