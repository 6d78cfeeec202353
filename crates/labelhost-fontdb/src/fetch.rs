//! Production font fetcher: HTTP(S) via reqwest, everything else from disk

use futures::future::BoxFuture;
use labelhost_core::{error::Result, FontFetcher, FontLoadError};

/// Fetches `http(s)://` sources over the network and reads anything else
/// (plain paths, `file://` URLs) from the local filesystem
#[derive(Debug, Clone, Default)]
pub struct HttpFontFetcher {
    client: reqwest::Client,
}

impl HttpFontFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_remote(&self, source: &str) -> Result<Vec<u8>> {
        let failed = |reason: String| FontLoadError::FetchFailed {
            source_url: source.to_string(),
            reason,
        };

        let response = self
            .client
            .get(source)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FontLoadError::HttpStatus {
                source_url: source.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let bytes = response.bytes().await.map_err(|e| failed(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn fetch_local(&self, source: &str) -> Result<Vec<u8>> {
        let path = source.strip_prefix("file://").unwrap_or(source);
        tokio::fs::read(path).await.map_err(|e| {
            FontLoadError::FetchFailed {
                source_url: source.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

impl FontFetcher for HttpFontFetcher {
    fn fetch<'a>(&'a self, source: &'a str) -> BoxFuture<'a, Result<Vec<u8>>> {
        Box::pin(async move {
            log::debug!("Fetching font {}", source);
            if is_remote(source) {
                self.fetch_remote(source).await
            } else {
                self.fetch_local(source).await
            }
        })
    }
}
