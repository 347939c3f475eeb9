use async_trait::async_trait;
use std::path::PathBuf;

/// Supplies schema text for a (ref, path) coordinate.
///
/// The hosting layer implements this against whatever stores the
/// repository content. `None` means the file does not exist at that
/// coordinate; transport concerns (auth, retries) stay behind the
/// implementation.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, reference: &str, path: &str) -> Option<String>;
}

/// Reads schema files from a local directory tree, ignoring the ref.
/// Used by the CLI host and in tests.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ContentFetcher for FileFetcher {
    async fn fetch(&self, _reference: &str, path: &str) -> Option<String> {
        tokio::fs::read_to_string(self.root.join(path)).await.ok()
    }
}

#[cfg(test)]
mod tests;
