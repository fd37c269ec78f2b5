use std::path::Path;

use crate::error::{AppError, AppResult};

/// One chat file chosen by the user, held in memory until it is uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as sent in the multipart `file` part
    pub name: String,
    /// Raw bytes, uploaded without any inspection
    pub content: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Reads a file from disk, naming it after the last path component
    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                AppError::InvalidInput(format!("Not a file path: {}", path.display()))
            })?;

        let content = tokio::fs::read(path).await?;

        tracing::debug!(file = %name, bytes = content.len(), "Read chat file");

        Ok(Self { name, content })
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
