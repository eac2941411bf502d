//! Font Bootstrap
//!
//! Makes sure a Unicode-capable TrueType font is available before anything
//! is rendered, so Korean labels display the same on every machine.
//!
//! ## Flow
//!
//! 1. If the configured file is missing, fetch it once (under a timeout) into
//!    a `.part` file and rename it into place
//! 2. Load the bytes and check the sfnt magic number
//! 3. Return a `FontHandle`; charts use its family for all text and the page
//!    serves its bytes through `@font-face`
//!
//! On failure the `FontFallback` policy decides between aborting and the
//! browser's default sans-serif font.

mod fetcher;

pub use fetcher::{FontFetcher, HttpFontFetcher};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::config::{FontConfig, FontFallback};

/// Family used when no font file is registered
pub const SYSTEM_FAMILY: &str = "sans-serif";

/// Errors raised while obtaining the font
#[derive(Error, Debug)]
pub enum FontError {
    /// Network failure
    #[error("Font download failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Font download from {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Reading or writing the font file failed
    #[error("Font file error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The download did not finish in time
    #[error("Font download timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The file is not a TrueType/OpenType font
    #[error("Not a TrueType/OpenType font: {path:?}")]
    Invalid { path: PathBuf },
}

impl FontError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        FontError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Clone)]
enum FontSource {
    Embedded { path: PathBuf, bytes: Arc<[u8]> },
    System,
}

/// The font registered as the default for all rendered text
#[derive(Clone)]
pub struct FontHandle {
    family: String,
    source: FontSource,
}

impl FontHandle {
    /// Register font bytes loaded from `path` under `family`
    pub fn from_bytes(
        family: impl Into<String>,
        path: impl Into<PathBuf>,
        bytes: Vec<u8>,
    ) -> Result<Self, FontError> {
        let path = path.into();
        if !is_sfnt(&bytes) {
            return Err(FontError::Invalid { path });
        }

        Ok(Self {
            family: family.into(),
            source: FontSource::Embedded {
                path,
                bytes: Arc::from(bytes),
            },
        })
    }

    /// No embedded font; text uses the browser's sans-serif
    pub fn system_default() -> Self {
        Self {
            family: SYSTEM_FAMILY.to_string(),
            source: FontSource::System,
        }
    }

    /// Registered family name
    pub fn family(&self) -> &str {
        &self.family
    }

    /// CSS font-family list for chart text, with a generic fallback
    pub fn css_family(&self) -> String {
        match self.source {
            FontSource::Embedded { .. } => format!("{}, {}", self.family, SYSTEM_FAMILY),
            FontSource::System => SYSTEM_FAMILY.to_string(),
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.source {
            FontSource::Embedded { bytes, .. } => Some(bytes.as_ref()),
            FontSource::System => None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FontSource::Embedded { path, .. } => Some(path.as_path()),
            FontSource::System => None,
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.source, FontSource::Embedded { .. })
    }
}

impl std::fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontHandle")
            .field("family", &self.family)
            .field("path", &self.path())
            .field("bytes", &self.bytes().map(<[u8]>::len))
            .finish()
    }
}

/// TrueType, OpenType (CFF), Apple 'true' and font collections
fn is_sfnt(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"OTTO") | Some(b"true") | Some(b"ttcf")
    )
}

/// Startup step that produces the `FontHandle`
pub struct FontBootstrapper<F = HttpFontFetcher> {
    config: FontConfig,
    fetcher: F,
}

impl FontBootstrapper<HttpFontFetcher> {
    /// Bootstrapper that downloads with reqwest
    ///
    /// The client carries no timeout; `fetch_timeout_secs` bounds the whole
    /// download and is reported as `FontError::Timeout`.
    pub fn new(config: FontConfig) -> Result<Self, FontError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self::with_fetcher(config, HttpFontFetcher::with_client(client)))
    }
}

impl<F: FontFetcher> FontBootstrapper<F> {
    pub fn with_fetcher(config: FontConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    /// Make sure the font exists locally and register it
    ///
    /// Downloads at most once: a present file is used as is.
    pub async fn ensure_font(&self) -> Result<FontHandle, FontError> {
        match self.load_or_fetch().await {
            Ok(handle) => {
                tracing::info!(
                    family = %handle.family(),
                    path = ?self.config.path,
                    "Font registered"
                );
                Ok(handle)
            }
            Err(e) => match self.config.fallback {
                FontFallback::Fail => Err(e),
                FontFallback::System => {
                    tracing::warn!(
                        error = %e,
                        "Font unavailable, falling back to the system default font"
                    );
                    Ok(FontHandle::system_default())
                }
            },
        }
    }

    async fn load_or_fetch(&self) -> Result<FontHandle, FontError> {
        let path = &self.config.path;

        let present = tokio::fs::try_exists(path)
            .await
            .map_err(|e| FontError::io(path, e))?;

        if present {
            tracing::debug!(path = ?path, "Font file already present, skipping download");
        } else {
            self.download().await?;
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| FontError::io(path, e))?;

        FontHandle::from_bytes(self.config.family.clone(), path.clone(), bytes)
    }

    async fn download(&self) -> Result<(), FontError> {
        let path = &self.config.path;
        let part = part_path(path);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FontError::io(parent, e))?;
        }

        tracing::info!(url = %self.config.url, path = ?path, "Downloading font");

        let fetched = tokio::time::timeout(
            self.config.fetch_timeout(),
            self.fetcher.fetch(&self.config.url, &part),
        )
        .await;

        let written = match fetched {
            Ok(Ok(written)) => written,
            Ok(Err(e)) => {
                discard_partial(&part).await;
                return Err(e);
            }
            Err(_) => {
                discard_partial(&part).await;
                return Err(FontError::Timeout {
                    secs: self.config.fetch_timeout_secs,
                });
            }
        };

        if let Err(e) = tokio::fs::rename(&part, path).await {
            discard_partial(&part).await;
            return Err(FontError::io(path, e));
        }

        tracing::info!(bytes = written, path = ?path, "Font downloaded");
        Ok(())
    }
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

async fn discard_partial(part: &Path) {
    if let Err(e) = tokio::fs::remove_file(part).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = ?part, error = %e, "Failed to remove partial font download");
        }
    }
}
