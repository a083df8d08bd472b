use crate::error::ExtractError;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Video metadata returned by the tikwm downloader API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoInfo {
    /// The video caption
    #[serde(default)]
    pub title: String,
    /// Standard quality playback URL
    #[serde(default)]
    pub play: String,
    /// High definition playback URL, when available
    #[serde(default)]
    pub hdplay: Option<String>,
    /// Cover image URL
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub duration: u64,
}

impl VideoInfo {
    /// Preferred playback URL: HD when present, standard otherwise.
    pub fn playback_url(&self) -> &str {
        self.hdplay
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(&self.play)
    }
}

#[derive(Debug, Deserialize)]
struct TikwmResponse {
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Value,
}

pub struct TikwmFetcher {
    client: Client,
    endpoint: String,
}

impl TikwmFetcher {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(30)))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/", base_url.trim_end_matches('/')),
        })
    }

    /// Resolve a TikTok video URL into playback URLs, caption and cover.
    pub async fn fetch(&self, url: &str) -> Result<VideoInfo, ExtractError> {
        info!("Fetching TikTok video data for {}", url);

        let response: TikwmResponse = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "url": url, "hd": 1 }))
            .send()
            .await?
            .json()
            .await?;

        debug!("tikwm response: code={} msg={}", response.code, response.msg);

        let unavailable = |message: String| ExtractError::VideoUnavailable {
            code: response.code,
            message,
        };

        if response.code != 0 {
            return Err(unavailable(response.msg));
        }

        // Failed lookups sometimes come back as code 0 with an empty payload
        let info: VideoInfo = serde_json::from_value(response.data)
            .map_err(|e| unavailable(format!("unexpected payload: {}", e)))?;
        if info.playback_url().is_empty() {
            return Err(unavailable("no playback URL in response".to_string()));
        }

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_url_prefers_hd() {
        let info = VideoInfo {
            play: "https://cdn.example.com/sd.mp4".to_string(),
            hdplay: Some("https://cdn.example.com/hd.mp4".to_string()),
            ..Default::default()
        };
        assert_eq!(info.playback_url(), "https://cdn.example.com/hd.mp4");
    }

    #[test]
    fn test_playback_url_falls_back_to_standard() {
        let info = VideoInfo {
            play: "https://cdn.example.com/sd.mp4".to_string(),
            hdplay: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(info.playback_url(), "https://cdn.example.com/sd.mp4");
    }

    #[tokio::test]
    async fn test_fetch_posts_url_with_hd_flag() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/")
            .match_body(mockito::Matcher::Json(json!({
                "url": "https://www.tiktok.com/@cook/video/1",
                "hd": 1
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"code":0,"msg":"success","data":{"title":"Best soup #recipe","play":"https://cdn/sd.mp4","hdplay":"https://cdn/hd.mp4","cover":"https://cdn/cover.jpg","duration":42}}"#,
            )
            .create_async()
            .await;

        let fetcher = TikwmFetcher::new(&server.url(), None).unwrap();
        let info = fetcher
            .fetch("https://www.tiktok.com/@cook/video/1")
            .await
            .unwrap();

        assert_eq!(info.title, "Best soup #recipe");
        assert_eq!(info.playback_url(), "https://cdn/hd.mp4");
        assert_eq!(info.cover.as_deref(), Some("https://cdn/cover.jpg"));
        assert_eq!(info.duration, 42);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_zero_code_is_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code":-1,"msg":"Url parsing is failed! Please check url."}"#)
            .create_async()
            .await;

        let fetcher = TikwmFetcher::new(&server.url(), None).unwrap();
        let result = fetcher.fetch("https://example.com/not-tiktok").await;

        match result {
            Err(ExtractError::VideoUnavailable { code, message }) => {
                assert_eq!(code, -1);
                assert!(message.contains("Url parsing"));
            }
            other => panic!("Expected VideoUnavailable, got {:?}", other),
        }
    }
}
