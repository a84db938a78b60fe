use indexmap::IndexSet;

use crate::config::{SEARCH_PAGE_SIZE, SearchConfig};
use crate::models::ChannelId;
use crate::outcome::Outcome;
use crate::youtube::{SearchRequest, VideoPlatform};

/// Owning channels of the most viewed videos published since the cutoff,
/// in first-seen order and without duplicates.
///
/// Any failed request aborts the whole search: the outcome is `Failed` and
/// callers must treat it as "nothing found".
pub async fn find_popular_channels<P>(platform: &P, config: &SearchConfig) -> Outcome<IndexSet<ChannelId>>
where
    P: VideoPlatform + ?Sized,
{
    let mut channel_ids = IndexSet::new();
    let mut page_token: Option<String> = None;
    let mut videos_seen: u32 = 0;

    while videos_seen < config.max_results {
        let request = SearchRequest {
            query: config.query.clone(),
            published_after: config.cutoff,
            max_results: SEARCH_PAGE_SIZE.min(config.max_results - videos_seen),
            page_token: page_token.take(),
        };
        tracing::debug!(
            page_size = request.max_results,
            videos_seen,
            "requesting search page"
        );

        let page = match platform.search_videos(&request).await {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(error = %err, "video search aborted");
                return Outcome::Failed(err);
            }
        };

        if page.items.is_empty() {
            break;
        }

        for item in page.items {
            channel_ids.insert(item.snippet.channel_id);
            videos_seen += 1;
            if videos_seen >= config.max_results {
                break;
            }
        }

        match page.next_page_token {
            Some(token) if videos_seen < config.max_results => page_token = Some(token),
            _ => break,
        }
    }

    tracing::info!(
        videos_seen,
        channels = channel_ids.len(),
        "video search finished"
    );
    Outcome::Complete(channel_ids)
}
