use chrono::DateTime;

use crate::config::CHANNEL_BATCH_SIZE;
use crate::models::{ChannelId, ChannelRecord};
use crate::outcome::{Outcome, StageWarning};
use crate::youtube::{ChannelItem, VideoPlatform};

/// Look up channel details in batches of `CHANNEL_BATCH_SIZE`.
///
/// A failed batch is recorded as a warning and skipped; a channel whose
/// creation date does not parse is dropped with a warning. The remaining
/// records keep the order of `channel_ids`. When every batch fails the
/// outcome is `Failed` with the first batch's error.
pub async fn fetch_channel_details<P>(platform: &P, channel_ids: &[ChannelId]) -> Outcome<Vec<ChannelRecord>>
where
    P: VideoPlatform + ?Sized,
{
    let mut records = Vec::with_capacity(channel_ids.len());
    let mut warnings = Vec::new();
    let mut failed_batches = 0;

    for (index, batch) in channel_ids.chunks(CHANNEL_BATCH_SIZE).enumerate() {
        let first = index * CHANNEL_BATCH_SIZE + 1;
        let last = first + batch.len() - 1;
        tracing::debug!(first, last, total = channel_ids.len(), "fetching channel batch");

        let items = match platform.list_channels(batch).await {
            Ok(items) => items,
            Err(error) => {
                tracing::warn!(first, last, error = %error, "channel batch failed");
                failed_batches += 1;
                warnings.push(StageWarning::BatchFailed { first, last, error });
                continue;
            }
        };

        for item in items {
            match decode_channel(item) {
                Ok(record) => records.push(record),
                Err(warning) => {
                    tracing::warn!(%warning, "skipping channel");
                    warnings.push(warning);
                }
            }
        }
    }

    let every_batch_failed =
        failed_batches > 0 && failed_batches == channel_ids.len().div_ceil(CHANNEL_BATCH_SIZE);
    if !every_batch_failed {
        return Outcome::from_parts(records, warnings);
    }

    match warnings.into_iter().next() {
        Some(StageWarning::BatchFailed { error, .. }) => Outcome::Failed(error),
        // nothing but batch failures is recorded when no batch succeeded
        _ => Outcome::Complete(records),
    }
}

/// Convert one API item, rejecting it if the creation date is malformed
pub fn decode_channel(item: ChannelItem) -> Result<ChannelRecord, StageWarning> {
    let created_at = match item.snippet.published_at.as_deref() {
        Some(raw) => match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(created_at) => Some(created_at),
            Err(_) => {
                return Err(StageWarning::InvalidDate {
                    channel_id: item.id,
                    raw: raw.to_string(),
                });
            }
        },
        None => None,
    };

    let stats = item.statistics;
    Ok(ChannelRecord {
        id: item.id,
        name: item.snippet.title,
        description: item.snippet.description,
        created_at,
        subscriber_count: stats.subscriber_count.unwrap_or(0),
        view_count: stats.view_count.unwrap_or(0),
        video_count: stats.video_count.unwrap_or(0),
        hidden_subscriber_count: stats.hidden_subscriber_count,
    })
}
