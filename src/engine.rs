//! The transcoding engine: a process-lifetime service with a virtual file
//! namespace and an ffmpeg-style command surface.
//!
//! The engine owns no codec logic itself; that sits behind the [`Transcoder`]
//! seam. What the engine enforces is the lifecycle (explicit `init` and
//! `shutdown`), the virtual storage used to pass buffers in and out, and the
//! invariant that at most one transcode is in flight at a time.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use crate::audio;
use crate::error::{Result, TrimError};
use crate::region::RegionBounds;

/// Codec backend the engine delegates to.
pub trait Transcoder: Send + Sync {
    /// One-time bootstrap work. The default backend has none.
    fn load(&self) -> Result<()> {
        Ok(())
    }

    /// Extract `[bounds.start, bounds.end)` from `input` and return the
    /// re-encoded bytes. `input_name` is a format hint (file extension).
    fn trim(&self, input_name: &str, input: &[u8], bounds: RegionBounds) -> Result<Vec<u8>>;
}

/// Default backend: symphonia decode, sample-level trim, hound WAV encode.
pub struct SymphoniaTranscoder;

impl Transcoder for SymphoniaTranscoder {
    fn trim(&self, input_name: &str, input: &[u8], bounds: RegionBounds) -> Result<Vec<u8>> {
        let decoded = audio::decode_audio_bytes(input_name, input.to_vec())?;
        let trimmed = audio::trim_audio(&decoded, &bounds)?;
        audio::encode_wav_bytes(&trimmed)
    }
}

/// A parsed `exec` argument vector: `-i INPUT [-ss START] [-to END] OUTPUT`.
#[derive(Debug, Clone, PartialEq)]
struct ExecCommand {
    input: String,
    start: Option<f64>,
    end: Option<f64>,
    output: String,
}

fn parse_exec_args(args: &[String]) -> Result<ExecCommand> {
    let mut input = None;
    let mut start = None;
    let mut end = None;
    let mut output = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-i" => {
                let value = iter
                    .next()
                    .ok_or_else(|| TrimError::BadCommand("-i requires a value".to_string()))?;
                input = Some(value.clone());
            }
            "-ss" => {
                let value = iter
                    .next()
                    .ok_or_else(|| TrimError::BadCommand("-ss requires a value".to_string()))?;
                start = Some(value.parse::<f64>().map_err(|_| {
                    TrimError::BadCommand(format!("Bad -ss value: '{}'", value))
                })?);
            }
            "-to" => {
                let value = iter
                    .next()
                    .ok_or_else(|| TrimError::BadCommand("-to requires a value".to_string()))?;
                end = Some(value.parse::<f64>().map_err(|_| {
                    TrimError::BadCommand(format!("Bad -to value: '{}'", value))
                })?);
            }
            other if other.starts_with('-') => {
                return Err(TrimError::BadCommand(format!("Unknown flag: '{}'", other)));
            }
            other => {
                if output.is_some() {
                    return Err(TrimError::BadCommand(format!(
                        "Multiple output names: '{}'",
                        other
                    )));
                }
                output = Some(other.to_string());
            }
        }
    }

    Ok(ExecCommand {
        input: input.ok_or_else(|| TrimError::BadCommand("No input (-i) given".to_string()))?,
        start,
        end,
        output: output.ok_or_else(|| TrimError::BadCommand("No output name given".to_string()))?,
    })
}

struct EngineInner {
    loaded: AtomicBool,
    busy: AtomicBool,
    storage: Mutex<HashMap<String, Vec<u8>>>,
    transcoder: Box<dyn Transcoder>,
}

/// Releases the busy flag when an exec finishes, on every path.
struct BusyGuard(Arc<EngineInner>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.busy.store(false, Ordering::SeqCst);
    }
}

/// Handle to the transcoding engine. Cloning shares the same instance.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

impl Engine {
    /// Engine backed by a specific codec implementation.
    pub fn new(transcoder: impl Transcoder + 'static) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                loaded: AtomicBool::new(false),
                busy: AtomicBool::new(false),
                storage: Mutex::new(HashMap::new()),
                transcoder: Box::new(transcoder),
            }),
        }
    }

    /// Engine backed by the symphonia/hound pipeline.
    pub fn with_default_transcoder() -> Self {
        Self::new(SymphoniaTranscoder)
    }

    /// The process-wide shared engine instance.
    pub fn global() -> &'static Engine {
        static GLOBAL: OnceLock<Engine> = OnceLock::new();
        GLOBAL.get_or_init(Engine::with_default_transcoder)
    }

    /// One-time asynchronous bootstrap. Idempotent: a second call on an
    /// already-loaded engine is a no-op.
    pub async fn init(&self) -> Result<()> {
        if self.is_loaded() {
            return Ok(());
        }

        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.transcoder.load())
            .await
            .map_err(|e| TrimError::TaskFailed(format!("engine load: {}", e)))??;

        self.inner.loaded.store(true, Ordering::SeqCst);
        tracing::info!("Transcoding engine ready");
        Ok(())
    }

    /// Tear the engine down: drops all virtual-storage entries and returns
    /// to the not-loaded state.
    pub fn shutdown(&self) {
        self.inner.storage.lock().unwrap().clear();
        self.inner.loaded.store(false, Ordering::SeqCst);
        tracing::info!("Transcoding engine shut down");
    }

    /// Whether `init` has completed.
    pub fn is_loaded(&self) -> bool {
        self.inner.loaded.load(Ordering::SeqCst)
    }

    /// Write a buffer into virtual storage under `name`, replacing any
    /// previous entry.
    pub fn write_file(&self, name: &str, bytes: Vec<u8>) {
        self.inner.storage.lock().unwrap().insert(name.to_string(), bytes);
    }

    /// Read a buffer back out of virtual storage.
    pub fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        self.inner
            .storage
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| TrimError::MissingVirtualFile(name.to_string()))
    }

    /// Remove an entry from virtual storage.
    pub fn delete_file(&self, name: &str) -> Result<()> {
        self.inner
            .storage
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| TrimError::MissingVirtualFile(name.to_string()))
    }

    /// Names currently present in virtual storage, for inspection.
    pub fn storage_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.storage.lock().unwrap().keys().cloned().collect();
        names.sort();
        names
    }

    /// Run a command argument vector: `-i INPUT -ss START -to END OUTPUT`.
    ///
    /// Reads the input from virtual storage, hands the byte buffer to the
    /// transcoder on a blocking worker, and writes the result back under the
    /// output name. Only one exec may run at a time; a concurrent call fails
    /// with `EngineBusy` instead of racing on the shared instance.
    pub async fn exec(&self, args: &[String]) -> Result<()> {
        if !self.is_loaded() {
            return Err(TrimError::EngineNotReady);
        }

        if self
            .inner
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(TrimError::EngineBusy);
        }
        let _busy = BusyGuard(Arc::clone(&self.inner));

        let command = parse_exec_args(args)?;
        let input_bytes = self.read_file(&command.input)?;
        let bounds = RegionBounds::new(
            command.start.unwrap_or(0.0),
            command.end.unwrap_or(f64::INFINITY),
        )?;

        tracing::info!(
            input = %command.input,
            output = %command.output,
            start = bounds.start,
            end = bounds.end,
            "Running transcode"
        );

        let inner = Arc::clone(&self.inner);
        let input_name = command.input.clone();
        let output_bytes = tokio::task::spawn_blocking(move || {
            inner.transcoder.trim(&input_name, &input_bytes, bounds)
        })
        .await
        .map_err(|e| TrimError::TaskFailed(e.to_string()))??;

        self.write_file(&command.output, output_bytes);
        Ok(())
    }
}
