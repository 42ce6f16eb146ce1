//! Object-storage upload and public-URL construction.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::CONTENT_TYPE;

use crate::client::BackendClient;
use crate::error::BackendError;

/// Characters escaped inside a storage path segment. `/` is kept as the
/// segment separator.
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'#')
    .add(b'%');

impl BackendClient {
    /// Uploads `bytes` to `bucket` at `path` (upsert) and returns the
    /// object's public URL.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Http`] on network failure.
    /// - [`BackendError::UnexpectedStatus`] on a non-2xx response.
    /// - [`BackendError::InvalidBaseUrl`] if the object URL cannot be built.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BackendError> {
        let url = self
            .base_url
            .join(&format!("storage/v1/object/{bucket}/{path}"))
            .map_err(|e| BackendError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        let response = self
            .authed(self.client.post(url.clone()))
            .header("x-upsert", "true")
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        Self::check_status(&response, &url)?;

        tracing::debug!(bucket, path, "object uploaded");
        Ok(self.public_url(bucket, path))
    }

    /// The public (unauthenticated) URL for an object, with the path
    /// percent-encoded per segment.
    #[must_use]
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        let encoded = utf8_percent_encode(path, PATH_ESCAPE);
        format!(
            "{}storage/v1/object/public/{bucket}/{encoded}",
            self.base_url
        )
    }
}
