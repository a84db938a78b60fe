use crate::config::SearchConfig;
use crate::error::Error;
use crate::fetcher::fetch_channel_details;
use crate::finder::find_popular_channels;
use crate::models::{ChannelId, ResultRow};
use crate::outcome::StageWarning;
use crate::ranking::rank_new_channels;
use crate::youtube::VideoPlatform;

/// Everything a scan produced, including contained failures
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Set when the video search aborted; the scan then found nothing
    pub search_error: Option<Error>,
    /// Set when every channel lookup batch failed
    pub detail_error: Option<Error>,
    pub warnings: Vec<StageWarning>,
    /// Unique channels behind the scanned videos
    pub channels_found: usize,
    /// Channels whose details were decoded
    pub channels_fetched: usize,
    /// New channels, most subscribers first
    pub rows: Vec<ResultRow>,
}

/// Search, look up, filter and rank in one pass
pub async fn scan<P>(platform: &P, config: &SearchConfig) -> ScanReport
where
    P: VideoPlatform + ?Sized,
{
    let mut report = ScanReport::default();

    let channel_ids: Vec<ChannelId> = match find_popular_channels(platform, config).await.into_result() {
        Ok((ids, _)) => ids.into_iter().collect(),
        Err(err) => {
            report.search_error = Some(err);
            return report;
        }
    };
    report.channels_found = channel_ids.len();
    if channel_ids.is_empty() {
        return report;
    }

    let records = match fetch_channel_details(platform, &channel_ids).await.into_result() {
        Ok((records, warnings)) => {
            report.warnings = warnings;
            records
        }
        Err(err) => {
            report.detail_error = Some(err);
            return report;
        }
    };
    report.channels_fetched = records.len();

    report.rows = rank_new_channels(records, config.cutoff);
    tracing::info!(
        found = report.channels_found,
        fetched = report.channels_fetched,
        new = report.rows.len(),
        "scan finished"
    );
    report
}
