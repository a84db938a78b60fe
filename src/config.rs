use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::OnceLock;

use chrono::{DateTime, Duration, Utc};

use crate::error::{Error, Result};

/// Upper bound on `maxResults` for a single search page
pub const SEARCH_PAGE_SIZE: u32 = 50;

/// Upper bound on channel IDs per `channels.list` call
pub const CHANNEL_BATCH_SIZE: usize = 50;

pub const MAX_VIDEOS_RANGE: RangeInclusive<u32> = 50..=500;
pub const DEFAULT_MAX_VIDEOS: u32 = 100;

pub const WINDOW_DAYS_RANGE: RangeInclusive<u32> = 7..=90;
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the base data directory (~/.yt-scout/)
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| {
        std::env::var("YT_SCOUT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".yt-scout")
            })
    })
}

/// Get the .env file path
pub fn env_file_path() -> PathBuf {
    data_dir().join(".env")
}

/// Load environment variables from the data directory's .env file
pub fn load_env() {
    let env_path = env_file_path();
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    } else {
        // Try current directory as fallback
        let _ = dotenvy::dotenv();
    }
}

/// Get the YouTube Data API key, ignoring blank values
pub fn youtube_api_key() -> Option<String> {
    std::env::var("YOUTUBE_API_KEY")
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

/// Base URL of the YouTube Data API
pub fn api_base_url() -> String {
    std::env::var("YOUTUBE_API_BASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Create necessary directories if they don't exist
pub fn ensure_directories() -> Result<()> {
    std::fs::create_dir_all(data_dir())?;
    Ok(())
}

/// Parameters of a single scan, fixed when the run starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub started_at: DateTime<Utc>,
    /// Inclusive lower bound for both video publish time and channel creation
    pub cutoff: DateTime<Utc>,
    pub max_results: u32,
    pub window_days: u32,
    pub query: String,
}

impl SearchConfig {
    pub fn new(
        started_at: DateTime<Utc>,
        max_results: u32,
        window_days: u32,
        query: impl Into<String>,
    ) -> Result<Self> {
        if !MAX_VIDEOS_RANGE.contains(&max_results) {
            return Err(Error::Config(format!(
                "max videos must be between {} and {}, got {}",
                MAX_VIDEOS_RANGE.start(),
                MAX_VIDEOS_RANGE.end(),
                max_results
            )));
        }
        if !WINDOW_DAYS_RANGE.contains(&window_days) {
            return Err(Error::Config(format!(
                "recency window must be between {} and {} days, got {}",
                WINDOW_DAYS_RANGE.start(),
                WINDOW_DAYS_RANGE.end(),
                window_days
            )));
        }

        Ok(Self {
            started_at,
            cutoff: started_at - Duration::days(i64::from(window_days)),
            max_results,
            window_days,
            query: query.into(),
        })
    }
}
