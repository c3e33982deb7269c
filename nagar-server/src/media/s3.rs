use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;

use super::MediaStore;
use crate::error::BoxError;

/// Media kept in an S3 bucket behind a public base URL (bucket or CDN)
pub struct S3MediaStore {
    client: S3Client,
    bucket: String,
    public_base_url: String,
}

impl S3MediaStore {
    pub fn new(client: S3Client, bucket: impl Into<String>, public_base_url: &str) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String, BoxError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(data.into())
            .content_type(content_type)
            .send()
            .await?;
        Ok(format!("{}/{key}", self.public_base_url))
    }
}
