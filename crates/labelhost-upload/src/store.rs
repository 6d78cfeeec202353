//! Asset storage over HTTP

use futures::future::BoxFuture;
use labelhost_core::{error::Result, AssetStore, UploadError};
use reqwest::header::CONTENT_TYPE;

/// `PUT`s assets to `{base_url}{path}`; any 2xx is success and the
/// response body is ignored
#[derive(Debug, Clone)]
pub struct HttpAssetStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssetStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn put_inner(&self, path: &str, content_type: &str, body: Vec<u8>) -> Result<()> {
        let url = self.url_for(path);
        log::debug!("PUT {} ({} bytes, {})", url, body.len(), content_type);

        let response = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::HttpStatus(status.as_u16()).into());
        }
        Ok(())
    }
}

impl AssetStore for HttpAssetStore {
    fn put<'a>(
        &'a self,
        path: &'a str,
        content_type: &'a str,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.put_inner(path, content_type, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_ignores_trailing_slash() {
        let store = HttpAssetStore::new("http://localhost:8080/");
        assert_eq!(
            store.url_for("/api/assets/abc"),
            "http://localhost:8080/api/assets/abc"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Port 9 (discard) on loopback refuses connections on test machines
        let store = HttpAssetStore::new("http://127.0.0.1:9");
        let err = store.put("/api/assets/x", "image/png", vec![1]).await.unwrap_err();
        assert!(err.to_string().starts_with("Upload failed: "), "{}", err);
    }
}
