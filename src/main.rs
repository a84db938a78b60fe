use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use yt_scout::commands;
use yt_scout::commands::scan::ScanArgs;
use yt_scout::config::{DEFAULT_MAX_VIDEOS, DEFAULT_WINDOW_DAYS, load_env};

#[derive(Parser)]
#[command(name = "yt-scout")]
#[command(about = "Find recently created YouTube channels behind trending videos")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan popular recent videos for newly created channels
    Scan {
        /// YouTube Data API v3 key (falls back to YOUTUBE_API_KEY, then a prompt)
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Maximum number of videos to scan (50-500)
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_VIDEOS,
              value_parser = clap::value_parser!(u32).range(50..=500))]
        max_videos: u32,

        /// Channels created within this many days count as new (7-90)
        #[arg(short, long, default_value_t = DEFAULT_WINDOW_DAYS,
              value_parser = clap::value_parser!(u32).range(7..=90))]
        days: u32,

        /// Optional search query (default: any video)
        #[arg(short, long, default_value = "")]
        query: String,

        /// Directory for the CSV export
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Only print the table
        #[arg(long)]
        no_export: bool,
    },

    /// Save a YouTube Data API key
    Init {
        /// YouTube Data API v3 key
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    load_env();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            api_key,
            max_videos,
            days,
            query,
            output_dir,
            no_export,
        } => {
            commands::scan::run(ScanArgs {
                api_key,
                max_videos,
                days,
                query,
                output_dir,
                export: !no_export,
            })
            .await
        }
        Commands::Init { api_key, force } => commands::init::run(api_key, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
}
