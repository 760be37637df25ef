//! # Reference Document Store
//!
//! The admissions policy text is extracted from its PDF ahead of time and
//! shipped as a plain text file. `DocumentStore` reads it on first use and
//! keeps it in memory for the lifetime of the process.

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info, warn};

/// Where the reference text comes from.
#[async_trait]
pub trait DocumentSource: Send + Sync + Debug {
    /// Reads the full document text.
    async fn load(&self) -> std::io::Result<String>;
}

/// Reads the document from a file on disk.
#[derive(Clone, Debug)]
pub struct FileDocumentSource {
    path: PathBuf,
}

impl FileDocumentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentSource for FileDocumentSource {
    async fn load(&self) -> std::io::Result<String> {
        info!(path = %self.path.display(), "Reading reference document.");
        tokio::fs::read_to_string(&self.path).await
    }
}

/// A read-through, load-once cache for the reference document.
///
/// Only a successful, non-empty load is cached. A missing or unreadable
/// document makes `get` return `None`, and the next call tries again.
#[derive(Debug)]
pub struct DocumentStore {
    source: Box<dyn DocumentSource>,
    cached: OnceCell<Arc<str>>,
}

impl DocumentStore {
    /// Creates a store over an arbitrary source.
    pub fn new(source: Box<dyn DocumentSource>) -> Self {
        Self {
            source,
            cached: OnceCell::new(),
        }
    }

    /// Creates a store that reads the document from `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(FileDocumentSource::new(path)))
    }

    /// Returns the document, reading it on the first successful call.
    ///
    /// Never fails: an unavailable document is reported as `None` and logged.
    pub async fn get(&self) -> Option<Arc<str>> {
        let loaded = self
            .cached
            .get_or_try_init(|| async {
                match self.source.load().await {
                    Ok(text) if text.trim().is_empty() => {
                        warn!("Reference document is empty; treating it as unavailable.");
                        Err(())
                    }
                    Ok(text) => {
                        info!(chars = text.chars().count(), "Reference document loaded.");
                        Ok(Arc::<str>::from(text))
                    }
                    Err(e) => {
                        error!("Error reading reference document: {e}");
                        Err(())
                    }
                }
            })
            .await;

        loaded.ok().cloned()
    }

    /// Whether the document has already been loaded into memory.
    pub fn is_loaded(&self) -> bool {
        self.cached.initialized()
    }
}
