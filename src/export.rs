//! The trim/export command sequence: original bytes in, trimmed artifact out.

use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::error::{Result, TrimError};
use crate::region::RegionBounds;

/// Fixed name the original file is written under in engine storage.
pub const INPUT_NAME: &str = "audio.mp3";

/// Fixed name the engine is asked to produce, and the artifact's file name.
pub const OUTPUT_NAME: &str = "output.mp3";

/// MIME type attached to the exported artifact.
pub const OUTPUT_MIME: &str = "audio/mp3";

/// A finished export, ready to be saved or offered as a download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: String,
    #[serde(skip)]
    pub data: Vec<u8>,
}

/// Run one trim/export cycle against the engine.
///
/// Fails fast if the engine has not been loaded. Otherwise: writes the
/// original bytes into virtual storage, execs an extraction command with the
/// stringified region bounds, reads the result back, and deletes both
/// virtual entries. Cleanup runs on the success path only; a failed run
/// leaves its storage entries behind.
pub async fn export_region(
    engine: &Engine,
    audio_bytes: Vec<u8>,
    bounds: RegionBounds,
) -> Result<ExportArtifact> {
    if !engine.is_loaded() {
        tracing::error!("Export requested before the engine finished loading");
        return Err(TrimError::EngineNotReady);
    }

    tracing::info!(
        start = bounds.start,
        end = bounds.end,
        bytes = audio_bytes.len(),
        "Exporting trimmed region"
    );

    engine.write_file(INPUT_NAME, audio_bytes);

    let args = vec![
        "-i".to_string(),
        INPUT_NAME.to_string(),
        "-ss".to_string(),
        bounds.start.to_string(),
        "-to".to_string(),
        bounds.end.to_string(),
        OUTPUT_NAME.to_string(),
    ];
    engine.exec(&args).await?;

    let data = engine.read_file(OUTPUT_NAME)?;

    engine.delete_file(INPUT_NAME)?;
    engine.delete_file(OUTPUT_NAME)?;

    tracing::info!(bytes = data.len(), "Export finished");

    Ok(ExportArtifact {
        file_name: OUTPUT_NAME.to_string(),
        mime_type: OUTPUT_MIME.to_string(),
        data,
    })
}
