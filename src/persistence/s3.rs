//! AWS S3 implementation of the blob backend.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;

use super::BlobStore;
use crate::config::SparkleConfig;
use crate::credentials::EnvCredentials;
use crate::error::{SparkleError, SparkleResult};

/// Content type stamped on every upload.
const CONTENT_TYPE: &str = "text/plain";

/// S3-backed [`BlobStore`] scoped to a single bucket.
///
/// Holds no credential state of its own beyond the static provider
/// handed to the SDK client at construction.
#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
}

impl S3BlobStore {
    /// Builds a client for the configured bucket, region, and optional
    /// S3-compatible endpoint.
    #[must_use]
    pub fn new(config: &SparkleConfig, credentials: &EnvCredentials) -> Self {
        let provider = Credentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            None,
            None,
            "sparkle-env",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(provider);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self::from_client(Client::from_conf(builder.build()), config.bucket.clone())
    }

    /// Wraps an existing SDK client.
    #[must_use]
    pub fn from_client(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// Returns the target bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn get(&self, key: &str) -> SparkleResult<Option<Vec<u8>>> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(GetObjectError::is_no_such_key) =>
            {
                return Ok(None);
            }
            Err(err) => {
                return Err(SparkleError::Transport(format!(
                    "get s3://{}/{key}: {}",
                    self.bucket,
                    DisplayErrorContext(&err)
                )));
            }
        };

        let data = output.body.collect().await.map_err(|e| {
            SparkleError::Transport(format!("read s3://{}/{key}: {e}", self.bucket))
        })?;
        Ok(Some(data.into_bytes().to_vec()))
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> SparkleResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(CONTENT_TYPE)
            .acl(ObjectCannedAcl::BucketOwnerFullControl)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| {
                SparkleError::Transport(format!(
                    "put s3://{}/{key}: {}",
                    self.bucket,
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}
