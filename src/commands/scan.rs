use std::path::PathBuf;

use chrono::Utc;

use crate::config::{SearchConfig, youtube_api_key};
use crate::error::{Error, Result};
use crate::export::write_export;
use crate::outcome::StageWarning;
use crate::pipeline::{ScanReport, scan};
use crate::presentation::{display_rows, render_table};
use crate::prompt::read_secret;
use crate::youtube::YouTubeClient;

pub struct ScanArgs {
    pub api_key: Option<String>,
    pub max_videos: u32,
    pub days: u32,
    pub query: String,
    pub output_dir: PathBuf,
    pub export: bool,
}

pub async fn run(args: ScanArgs) -> Result<()> {
    let config = SearchConfig::new(Utc::now(), args.max_videos, args.days, args.query)?;

    let api_key = resolve_api_key(args.api_key, youtube_api_key(), || {
        read_secret("YouTube Data API v3 key: ")
    })?;
    let client = YouTubeClient::new(&api_key)?;

    eprintln!(
        "Searching the {} most viewed videos published since {}...",
        config.max_results,
        config.cutoff.format("%Y-%m-%d %H:%M UTC")
    );
    let report = scan(&client, &config).await;
    print_status(&report);

    let rows = display_rows(&report.rows);
    println!("{}", summary_line(rows.len()));

    if rows.is_empty() {
        println!(
            "No channel created in the last {} days was found behind the top {} videos.",
            config.window_days, config.max_results
        );
        return Ok(());
    }

    println!();
    print!("{}", render_table(&rows));

    if args.export {
        if let Some(path) = write_export(&args.output_dir, &rows, config.started_at)? {
            println!("\nSaved CSV: {}", path.display());
        }
    }

    Ok(())
}

/// Flag, then environment / .env, then the prompt. Blank values fall through.
fn resolve_api_key<F>(flag: Option<String>, env: Option<String>, prompt: F) -> Result<String>
where
    F: FnOnce() -> Result<String>,
{
    let given = [flag, env]
        .into_iter()
        .flatten()
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty());

    let key = match given {
        Some(key) => key,
        None => prompt()?.trim().to_string(),
    };

    if key.is_empty() {
        return Err(Error::ApiKeyMissing);
    }
    Ok(key)
}

fn summary_line(found: usize) -> String {
    format!("{} new channels found.", found)
}

fn print_status(report: &ScanReport) {
    if let Some(err) = &report.search_error {
        report_error("Video search failed", err);
    }

    if report.search_error.is_none() {
        eprintln!(
            "Found {} unique channel(s) behind popular videos.",
            report.channels_found
        );
    }

    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
        if let StageWarning::BatchFailed { error, .. } = warning {
            if let Some(hint) = error.hint() {
                eprintln!("  {}", hint);
            }
        }
    }

    if let Some(err) = &report.detail_error {
        report_error("Channel lookup failed", err);
    }
}

fn report_error(context: &str, err: &Error) {
    let kind = if err.is_api() { "API error" } else { "unexpected error" };
    eprintln!("{} ({}): {}", context, kind, err);
    if let Some(hint) = err.hint() {
        eprintln!("  {}", hint);
    }
}
