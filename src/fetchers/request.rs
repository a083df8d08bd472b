use crate::error::ExtractError;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

/// Desktop browser user agent; the video CDN rejects unknown clients.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Downloads raw bytes (videos, cover images) over plain GET requests.
#[derive(Clone)]
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, ExtractError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(BROWSER_USER_AGENT)?);

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ExtractError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_bytes_sends_browser_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/video.mp4")
            .match_header("user-agent", BROWSER_USER_AGENT)
            .with_status(200)
            .with_body(b"\x00\x00\x00\x18ftypmp42")
            .create_async()
            .await;

        let fetcher = RequestFetcher::new(None).unwrap();
        let bytes = fetcher
            .fetch_bytes(&format!("{}/video.mp4", server.url()))
            .await
            .unwrap();

        assert_eq!(&bytes[4..8], b"ftyp");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_bytes_rejects_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/missing.mp4")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = RequestFetcher::new(None).unwrap();
        let result = fetcher
            .fetch_bytes(&format!("{}/missing.mp4", server.url()))
            .await;

        assert!(matches!(result, Err(ExtractError::FetchError(_))));
    }
}
