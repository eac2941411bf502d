//! Font download client
//!
//! Streams the font over HTTP into a file. Callers pick the destination;
//! the bootstrapper hands in a `.part` path and renames it when done.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use super::FontError;

/// Downloads a font file
#[async_trait]
pub trait FontFetcher: Send + Sync {
    /// Fetch `url` and write the body verbatim to `dest`.
    /// Returns the number of bytes written.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FontError>;
}

/// reqwest-backed fetcher: one unauthenticated GET
pub struct HttpFontFetcher {
    client: Client,
}

impl HttpFontFetcher {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Use a preconfigured client (proxies, TLS roots, ...)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpFontFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FontFetcher for HttpFontFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FontError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FontError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| FontError::io(dest, e))?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)
                .await
                .map_err(|e| FontError::io(dest, e))?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| FontError::io(dest, e))?;

        tracing::debug!(url = %url, bytes = written, "Font body received");
        Ok(written)
    }
}
