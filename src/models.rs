use chrono::{DateTime, FixedOffset};

/// Opaque channel identifier, unique per channel
pub type ChannelId = String;

/// Channel metadata decoded from a `channels.list` item
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelRecord {
    pub id: ChannelId,
    pub name: String,
    pub description: String,
    /// `None` when the platform omitted the creation date
    pub created_at: Option<DateTime<FixedOffset>>,
    /// 0 when the owner hides the count
    pub subscriber_count: u64,
    pub view_count: u64,
    pub video_count: u64,
    pub hidden_subscriber_count: bool,
}

impl ChannelRecord {
    pub fn url(&self) -> String {
        channel_url(&self.id)
    }
}

pub fn channel_url(id: &str) -> String {
    format!("https://www.youtube.com/channel/{}", id)
}

/// A channel that passed the recency filter
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub record: ChannelRecord,
    pub is_new: bool,
}
