//! YouTube Data v3 search client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use verselight_core::constants::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_YOUTUBE_BASE_URL};
use verselight_core::error::{Result, VerseError};
use verselight_core::traits::VideoSearchClient;
use verselight_core::types::Video;

use crate::http::{build_client, endpoint, require_key};

const SERVICE: &str = "youtube";

/// YouTube client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct YouTubeConfig {
    /// API base URL
    pub base_url: String,
    /// API key; checked before searching
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_YOUTUBE_BASE_URL.into(),
            api_key: None,
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl YouTubeConfig {
    /// Default config with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// YouTube search client.
pub struct YouTubeClient {
    config: YouTubeConfig,
    http_client: reqwest::Client,
}

impl YouTubeClient {
    /// Creates a client with the given config.
    pub fn with_config(config: YouTubeConfig) -> Result<Self> {
        Ok(Self {
            http_client: build_client(config.timeout_seconds)?,
            config,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl SearchItem {
    fn into_video(self) -> Option<Video> {
        Some(Video {
            video_id: self.id.video_id?,
            title: self.snippet.title,
            channel: self.snippet.channel_title,
            thumbnail: self.snippet.thumbnails.medium.map(|t| t.url).unwrap_or_default(),
            published_at: self.snippet.published_at,
        })
    }
}

#[async_trait]
impl VideoSearchClient for YouTubeClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Video>> {
        let api_key = require_key(&self.config.api_key, "YOUTUBE_API_KEY")?;
        let url = endpoint(&self.config.base_url, "youtube/v3/search")?;
        let max_results = max_results.to_string();

        let response = self
            .http_client
            .get(url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|e| VerseError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "YouTube API error");
            return Err(VerseError::upstream(
                SERVICE,
                format!("YouTube API error: {}", status.as_u16()),
            ));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| VerseError::InvalidFormat(format!("YouTube response: {}", e)))?;

        let videos: Vec<Video> = parsed
            .items
            .into_iter()
            .filter_map(SearchItem::into_video)
            .collect();

        debug!(count = videos.len(), "Search returned videos");
        Ok(videos)
    }

    fn is_configured(&self) -> bool {
        require_key(&self.config.api_key, "YOUTUBE_API_KEY").is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> YouTubeClient {
        YouTubeClient::with_config(YouTubeConfig::new("yt-key").with_base_url(server.uri())).unwrap()
    }

    fn item(id: &str, title: &str) -> serde_json::Value {
        json!({
            "id": {"kind": "youtube#video", "videoId": id},
            "snippet": {
                "title": title,
                "channelTitle": "Grace Church",
                "publishedAt": "2023-05-01T12:00:00Z",
                "thumbnails": {"medium": {"url": format!("https://i.ytimg.com/vi/{}/mqdefault.jpg", id)}}
            }
        })
    }

    #[tokio::test]
    async fn test_search_maps_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/search"))
            .and(query_param("q", "John 3:16 sermon"))
            .and(query_param("type", "video"))
            .and(query_param("maxResults", "4"))
            .and(query_param("key", "yt-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [item("a1", "God So Loved"), item("b2", "Born Again")]
            })))
            .mount(&server)
            .await;

        let videos = client_for(&server).search("John 3:16 sermon", 4).await.unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].video_id, "a1");
        assert_eq!(videos[0].channel, "Grace Church");
        assert_eq!(videos[0].thumbnail, "https://i.ytimg.com/vi/a1/mqdefault.jpg");
        assert_eq!(videos[1].title, "Born Again");
    }

    #[tokio::test]
    async fn test_search_skips_items_without_video_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"id": {"kind": "youtube#channel", "channelId": "c"}, "snippet": {"title": "Channel"}},
                    item("v1", "Video")
                ]
            })))
            .mount(&server)
            .await;

        let videos = client_for(&server).search("q", 4).await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].video_id, "v1");
    }

    #[tokio::test]
    async fn test_search_quota_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = client_for(&server).search("q", 4).await.unwrap_err();
        assert!(err.is_upstream_error());
    }

    #[test]
    fn test_is_configured() {
        assert!(YouTubeClient::with_config(YouTubeConfig::new("k")).unwrap().is_configured());
        assert!(!YouTubeClient::with_config(YouTubeConfig::default()).unwrap().is_configured());
    }
}
