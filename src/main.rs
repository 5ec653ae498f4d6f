use clap::Parser;

use wavetrim::audio::get_audio_info;
use wavetrim::{export_region, Engine, RegionBounds};

/// Command-line tool for trimming a region out of an audio file
#[derive(Parser, Debug)]
#[command(name = "wavetrim")]
#[command(about = "Extract a time region from an audio file", long_about = None)]
struct Args {
    /// Input audio file (MP3, FLAC, WAV, OGG, etc.)
    #[arg(short, long)]
    input: String,

    /// Output file for the trimmed audio
    #[arg(short, long)]
    output: String,

    /// Region start in seconds
    #[arg(short, long)]
    start: f64,

    /// Region end in seconds
    #[arg(short, long)]
    end: f64,

    /// Show detailed information
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with environment filter support
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wavetrim=info")),
        )
        .init();

    let args = Args::parse();

    let info = get_audio_info(&args.input)?;
    println!("Input: {}", args.input);
    println!(
        "  Duration: {:.2}s | {} Hz | {} channel(s) | {}",
        info.duration_seconds, info.sample_rate, info.channels, info.format
    );

    let bounds = RegionBounds::new(args.start, args.end)?;
    println!(
        "Region: {:.2}s to {:.2}s ({:.2}s)",
        bounds.start,
        bounds.end,
        bounds.duration()
    );

    if info.duration_seconds > 0.0 && bounds.start >= info.duration_seconds {
        eprintln!(
            "Error: region start ({:.2}s) is past the audio duration ({:.2}s)",
            bounds.start, info.duration_seconds
        );
        std::process::exit(1);
    }
    if info.duration_seconds > 0.0 && bounds.end > info.duration_seconds {
        println!(
            "Note: region end ({:.2}s) is past the end; trimming to {:.2}s",
            bounds.end, info.duration_seconds
        );
    }

    let engine = Engine::global();
    engine.init().await?;

    let started = std::time::Instant::now();
    let bytes = std::fs::read(&args.input)?;
    if args.verbose {
        println!(
            "  Read {} bytes ({:.2} MB)",
            bytes.len(),
            bytes.len() as f64 / 1_048_576.0
        );
    }

    let artifact = export_region(engine, bytes, bounds).await?;
    std::fs::write(&args.output, &artifact.data)?;

    if args.verbose {
        println!("  Transcode time: {:.2}s", started.elapsed().as_secs_f64());
    }
    println!("Done. Wrote {} bytes to {}", artifact.data.len(), args.output);

    Ok(())
}
