use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use clipcast::{LlmBackend, LlmConfig, SpeechClient, SpeechConfig};

#[derive(Parser)]
#[command(name = "clipcast")]
#[command(author, version, about = "Video transcript and highlight clip suggestion pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe a remotely stored recording into timestamped JSON
    Transcribe {
        /// Storage URI of the uploaded audio/video object (e.g. gs://bucket/video.mp4)
        uri: String,

        /// Sample rate of the source audio in hertz
        #[arg(long, default_value = "16000")]
        sample_rate_hertz: u32,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Suggest highlight clips from transcript text
    Analyze {
        /// Full transcript text to analyze
        transcript: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Transcribe {
            uri,
            sample_rate_hertz,
            verbose,
        } => {
            setup_logging(verbose);
            transcribe(uri, sample_rate_hertz).await
        }
        Commands::Analyze {
            transcript,
            verbose,
        } => {
            setup_logging(verbose);
            analyze(transcript).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn transcribe(uri: String, sample_rate_hertz: u32) -> Result<()> {
    let mut config = SpeechConfig::from_env().context("Failed to load speech configuration")?;
    config.sample_rate_hertz = sample_rate_hertz;

    let client = SpeechClient::new(config);

    info!("Starting transcription for {}", uri);
    let transcript = client
        .transcribe(&uri)
        .await
        .context("Failed to transcribe recording")?;
    info!(
        "Transcription finished: {} segments, {} words",
        transcript.segments.len(),
        transcript.word_count()
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&transcript).context("Failed to serialize transcript")?
    );

    Ok(())
}

async fn analyze(transcript: String) -> Result<()> {
    let config = LlmConfig::from_env();
    let backend = LlmBackend::from_config(&config).context("Failed to select LLM backend")?;

    let suggestions = backend
        .suggest_clips(&transcript)
        .await
        .context("Failed to analyze transcript")?;

    println!("{}", suggestions);

    Ok(())
}
