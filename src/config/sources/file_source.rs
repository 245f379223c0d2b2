//! Config documents read from the local filesystem.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::ConfigSource;
use crate::error::ProxyError;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn extension(&self) -> String {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string()
    }

    async fn fetch(&self) -> Result<String, ProxyError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProxyError::ConfigFileNotFound {
                    path: self.path.clone(),
                }
            } else {
                ProxyError::Io(e)
            }
        })
    }
}
