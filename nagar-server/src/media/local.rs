use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use super::MediaStore;
use crate::error::BoxError;

/// Media kept on the local filesystem and served by the HTTP server
pub struct LocalMediaStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, BoxError> {
        let relative = Path::new(key);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(format!("invalid media key: {key}").into());
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<String, BoxError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, data).await?;
        Ok(format!("{}/{key}", self.public_base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path(), "http://localhost:8080/media/");

        let url = store
            .put("complaints/1-abc.jpg", b"jpeg".to_vec(), "image/jpeg")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:8080/media/complaints/1-abc.jpg");
        let written = std::fs::read(dir.path().join("complaints/1-abc.jpg")).unwrap();
        assert_eq!(written, b"jpeg");
    }

    #[tokio::test]
    async fn test_put_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path(), "http://localhost/media");

        assert!(store.put("../escape.jpg", vec![1], "image/jpeg").await.is_err());
        assert!(store.put("/etc/passwd", vec![1], "text/plain").await.is_err());
    }
}
