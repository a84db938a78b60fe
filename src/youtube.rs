use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::config::api_base_url;
use crate::error::{ApiError, Error, Result};

/// One `search.list` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub published_after: DateTime<Utc>,
    pub max_results: u32,
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<SearchItem>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
    pub snippet: SearchSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    pub channel_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelItem {
    pub id: String,
    #[serde(default)]
    pub snippet: ChannelSnippet,
    #[serde(default)]
    pub statistics: ChannelStatistics,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Kept raw so a bad value only drops this channel
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(default, deserialize_with = "de_count")]
    pub subscriber_count: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub view_count: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub video_count: Option<u64>,
    #[serde(default)]
    pub hidden_subscriber_count: bool,
}

/// Counters are sent as decimal strings; plain numbers are accepted too
fn de_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
    }

    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Number(n)) => Ok(Some(n)),
        Some(Count::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid counter value '{}'", s))),
    }
}

/// The two read operations the scan needs from the video platform
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Fetch one page of videos ordered by view count
    async fn search_videos(&self, request: &SearchRequest) -> Result<SearchPage>;

    /// Fetch snippet, statistics and content details for up to 50 channels
    async fn list_channels(&self, ids: &[String]) -> Result<Vec<ChannelItem>>;
}

/// YouTube Data API v3 client authenticated with an API key
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    /// Build a client without touching the network
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, api_base_url())
    }

    pub fn with_base_url(api_key: &str, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(Error::ApiKeyMissing);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.into(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<T> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        let status = response.status();
        // the URL carries the key; keep it out of error text
        let text = response
            .text()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &text).into());
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn search_videos(&self, request: &SearchRequest) -> Result<SearchPage> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("type", "video".to_string()),
            ("order", "viewCount".to_string()),
            ("q", request.query.clone()),
            (
                "publishedAfter",
                request
                    .published_after
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            ("maxResults", request.max_results.to_string()),
        ];
        if let Some(token) = &request.page_token {
            params.push(("pageToken", token.clone()));
        }

        self.get("search", &params).await
    }

    async fn list_channels(&self, ids: &[String]) -> Result<Vec<ChannelItem>> {
        let params = [
            ("part", "snippet,statistics,contentDetails".to_string()),
            ("id", ids.join(",")),
        ];

        let response: ChannelListResponse = self.get("channels", &params).await?;
        Ok(response.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected_before_any_request() {
        assert!(matches!(YouTubeClient::new(""), Err(Error::ApiKeyMissing)));
        assert!(matches!(YouTubeClient::new("   "), Err(Error::ApiKeyMissing)));
        assert!(YouTubeClient::with_base_url("abc", "http://127.0.0.1:9").is_ok());
    }

    #[tokio::test]
    async fn transport_errors_do_not_leak_the_key() {
        let client = YouTubeClient::with_base_url("SECRET-KEY-123", "http://127.0.0.1:9").unwrap();
        let request = SearchRequest {
            query: String::new(),
            published_after: Utc::now(),
            max_results: 50,
            page_token: None,
        };

        let err = client.search_videos(&request).await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
        assert!(!err.to_string().contains("SECRET-KEY-123"), "{}", err);
        assert!(!format!("{:?}", err).contains("SECRET-KEY-123"));

        let err = client.list_channels(&["UC1".to_string()]).await.unwrap_err();
        assert!(!err.to_string().contains("SECRET-KEY-123"), "{}", err);
    }

    /// Answer one request with `body` and hand back its request line
    async fn serve_once(body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let request = String::from_utf8_lossy(&request).into_owned();
            request.lines().next().unwrap_or_default().to_string()
        });
        (base_url, handle)
    }

    #[tokio::test]
    async fn channel_lookup_sends_only_part_and_ids() {
        let (base_url, server) = serve_once(r#"{"items":[]}"#).await;
        let client = YouTubeClient::with_base_url("k", base_url).unwrap();

        let items = client
            .list_channels(&["UC1".to_string(), "UC2".to_string()])
            .await
            .unwrap();
        assert!(items.is_empty());

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /channels?"), "{}", request_line);
        assert!(request_line.contains("part=snippet%2Cstatistics%2CcontentDetails"), "{}", request_line);
        assert!(request_line.contains("id=UC1%2CUC2"), "{}", request_line);
        assert!(!request_line.contains("maxResults"), "{}", request_line);
    }

    #[test]
    fn decodes_search_page() {
        let body = r#"{
            "kind": "youtube#searchListResponse",
            "nextPageToken": "CDIQAA",
            "items": [
                {"id": {"kind": "youtube#video", "videoId": "v1"}, "snippet": {"channelId": "UC1", "title": "a"}},
                {"id": {"kind": "youtube#video", "videoId": "v2"}, "snippet": {"channelId": "UC2", "title": "b"}}
            ]
        }"#;

        let page: SearchPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("CDIQAA"));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id.video_id.as_deref(), Some("v1"));
        assert_eq!(page.items[1].snippet.channel_id, "UC2");
    }

    #[test]
    fn decodes_channel_statistics() {
        let body = r#"{
            "items": [{
                "id": "UC1",
                "snippet": {"title": "Chan", "description": "d", "publishedAt": "2025-01-02T03:04:05Z"},
                "statistics": {"viewCount": "12345", "subscriberCount": "678", "hiddenSubscriberCount": false, "videoCount": 9},
                "contentDetails": {"relatedPlaylists": {"uploads": "UU1"}}
            }, {
                "id": "UC2",
                "snippet": {"title": "Hidden"},
                "statistics": {"viewCount": "1", "hiddenSubscriberCount": true}
            }]
        }"#;

        let response: ChannelListResponse = serde_json::from_str(body).unwrap();
        let first = &response.items[0];
        assert_eq!(first.statistics.view_count, Some(12345));
        assert_eq!(first.statistics.subscriber_count, Some(678));
        assert_eq!(first.statistics.video_count, Some(9));
        assert_eq!(first.snippet.published_at.as_deref(), Some("2025-01-02T03:04:05Z"));

        let second = &response.items[1];
        assert_eq!(second.statistics.subscriber_count, None);
        assert!(second.statistics.hidden_subscriber_count);
        assert_eq!(second.snippet.published_at, None);
    }

    #[test]
    fn malformed_counter_fails_decoding() {
        let body = r#"{"items": [{"id": "UC1", "statistics": {"viewCount": "lots"}}]}"#;
        assert!(serde_json::from_str::<ChannelListResponse>(body).is_err());
    }
}
