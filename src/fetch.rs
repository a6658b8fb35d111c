//! Image downloads.
//!
//! Each URL is fetched independently; a failed download is reported against
//! its URL and never affects the others. There are no retries.

use std::time::Duration;

use crate::error::{MarqueeError, Result};

/// Downloads image bytes over HTTP.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

/// Outcome of one download, keyed by its URL.
pub type Fetched = (String, Result<Vec<u8>>);

impl ImageFetcher {
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| MarqueeError::Fetch(format!("HTTP client error: {}", e)))?;
        Ok(Self { client, max_bytes })
    }

    /// Download one URL, giving up as soon as it is known to exceed the
    /// size cap.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MarqueeError::Fetch(format!("Failed to download {}: {}", url, e)))?;
        if !response.status().is_success() {
            return Err(MarqueeError::Fetch(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }
        if let Some(len) = response.content_length() {
            if len > self.max_bytes as u64 {
                return Err(self.too_large(url, len));
            }
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| MarqueeError::Fetch(format!("Failed to read {}: {}", url, e)))?
        {
            if bytes.len() + chunk.len() > self.max_bytes {
                return Err(self.too_large(url, (bytes.len() + chunk.len()) as u64));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    fn too_large(&self, url: &str, seen: u64) -> MarqueeError {
        MarqueeError::Fetch(format!(
            "{} is over {} bytes (at least {})",
            url, self.max_bytes, seen
        ))
    }

    /// Download every URL concurrently. Results keep the input order.
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<Fetched> {
        let handles: Vec<_> = urls
            .iter()
            .cloned()
            .map(|url| {
                let fetcher = self.clone();
                tokio::spawn(async move {
                    let result = fetcher.fetch(&url).await;
                    (url, result)
                })
            })
            .collect();

        let mut out = Vec::with_capacity(handles.len());
        for (handle, url) in handles.into_iter().zip(urls) {
            let (url, result) = handle.await.unwrap_or_else(|e| {
                (
                    url.clone(),
                    Err(MarqueeError::Fetch(format!("Download task failed: {}", e))),
                )
            });
            match &result {
                Ok(bytes) => tracing::debug!(url = %url, bytes = bytes.len(), "image downloaded"),
                Err(e) => tracing::warn!(url = %url, error = %e, "image download failed"),
            }
            out.push((url, result));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::get};

    /// Serve `size` bytes at `/img` on an ephemeral port.
    async fn serve_bytes(size: usize) -> String {
        let app = Router::new().route("/img", get(move || async move { vec![7u8; size] }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/img", addr)
    }

    #[tokio::test]
    async fn test_download_within_limit() {
        let url = serve_bytes(512).await;
        let fetcher = ImageFetcher::new(Duration::from_secs(5), 1024).unwrap();
        assert_eq!(fetcher.fetch(&url).await.unwrap(), vec![7u8; 512]);
    }

    #[tokio::test]
    async fn test_download_over_limit_rejected() {
        let url = serve_bytes(4096).await;
        let fetcher = ImageFetcher::new(Duration::from_secs(5), 1024).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, MarqueeError::Fetch(ref m) if m.contains("over 1024")), "{:?}", err);
    }

    #[tokio::test]
    async fn test_bad_urls_fail_independently() {
        let fetcher = ImageFetcher::new(Duration::from_secs(2), 1024).unwrap();
        let urls = vec!["not a url".to_string(), "http://127.0.0.1:9/none.png".to_string()];
        let results = fetcher.fetch_all(&urls).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "not a url");
        assert_eq!(results[1].0, "http://127.0.0.1:9/none.png");
        assert!(results.iter().all(|(_, r)| matches!(r, Err(MarqueeError::Fetch(_)))));
    }
}
