//! S3/MinIO client for the report bucket.

use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};

use crate::config::StorageConfig;
use crate::models::{ApiError, ApiResult, ReportObject};

pub struct S3Client {
    client: Client,
    bucket: String,
}

impl S3Client {
    /// Build a client against the configured endpoint. Path-style addressing
    /// is required for S3-compatible services (MinIO, Ceph) where
    /// virtual-hosted style does not resolve.
    pub async fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "report-service",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint.clone())
            .credentials_provider(credentials)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }

    /// Create the report bucket if it does not exist yet. Already-owned
    /// buckets are fine; any other failure bubbles up to the caller.
    pub async fn ensure_bucket(&self) -> ApiResult<()> {
        match self.client.create_bucket().bucket(&self.bucket).send().await {
            Ok(_) => {
                tracing::info!("Created bucket '{}'", self.bucket);
                Ok(())
            }
            Err(e) => match e.code() {
                Some("BucketAlreadyOwnedByYou") | Some("BucketAlreadyExists") => Ok(()),
                _ => Err(ApiError::StorageUnavailable(format!(
                    "failed to create bucket '{}': {}",
                    self.bucket, e
                ))),
            },
        }
    }

    /// List every report in the bucket (handles pagination).
    pub async fn list_reports(&self) -> ApiResult<Vec<ReportObject>> {
        let mut reports = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self.client.list_objects_v2().bucket(&self.bucket);
            if let Some(token) = &continuation {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|e| {
                ApiError::StorageUnavailable(format!("failed to list reports: {}", e))
            })?;

            for object in response.contents() {
                let Some(key) = object.key() else { continue };
                reports.push(ReportObject {
                    key: key.to_string(),
                    size: object.size().unwrap_or(0),
                    last_modified: object
                        .last_modified()
                        .map(smithy_to_chrono)
                        .unwrap_or(DateTime::UNIX_EPOCH),
                });
            }

            match response.next_continuation_token() {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
        }

        Ok(reports)
    }

    /// Store report content under `key`, overwriting any existing object.
    pub async fn upload_report(&self, key: &str, data: Vec<u8>) -> ApiResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                ApiError::StorageUnavailable(format!("failed to store report '{}': {}", key, e))
            })?;

        tracing::info!("Stored report '{}' in bucket '{}'", key, self.bucket);
        Ok(())
    }

    /// Download a report into memory.
    pub async fn download_report(&self, key: &str) -> ApiResult<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    ApiError::NotFound(key.to_string())
                } else {
                    ApiError::StorageUnavailable(format!(
                        "failed to fetch report '{}': {}",
                        key, service_error
                    ))
                }
            })?;

        let data = response.body.collect().await.map_err(|e| {
            ApiError::StorageUnavailable(format!("failed to read report '{}': {}", key, e))
        })?;

        Ok(data.into_bytes().to_vec())
    }
}

fn smithy_to_chrono(ts: &aws_sdk_s3::primitives::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp(ts.secs(), ts.subsec_nanos()).unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smithy_timestamp_conversion() {
        let ts = aws_sdk_s3::primitives::DateTime::from_secs(1_704_110_400);
        let converted = smithy_to_chrono(&ts);
        assert_eq!(converted.to_rfc3339(), "2024-01-01T12:00:00+00:00");
    }
}
