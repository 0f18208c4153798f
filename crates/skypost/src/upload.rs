use std::path::{Path, PathBuf};

use miette::Diagnostic;
use skypost_api::app_bsky::embed::images::{Image, Images};
use skypost_api::com_atproto::repo::upload_blob::UploadBlob;
use skypost_common::error::{ClientError, XrpcResult};
use skypost_common::http_client::HttpClient;
use skypost_common::types::{BlobRef, MimeType};
use smol_str::SmolStr;
use thiserror::Error;

use crate::client::Agent;

/// Largest attachment accepted, in bytes.
pub const MAX_BLOB_SIZE: usize = 1_000_000;

/// Errors preparing or uploading an attachment.
#[derive(Debug, Error, Diagnostic)]
pub enum UploadError {
    /// The file couldn't be read
    #[error("failed to read file {}", .path.display())]
    #[diagnostic(code(skypost::upload::read))]
    Read {
        /// File path
        path: PathBuf,
        /// I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The file is over [`MAX_BLOB_SIZE`]
    #[error("image file size too large. {} bytes maximum, got: {size}", MAX_BLOB_SIZE)]
    #[diagnostic(
        code(skypost::upload::too_large),
        help("resize or recompress the image before posting")
    )]
    TooLarge {
        /// File path
        path: PathBuf,
        /// Actual size in bytes
        size: usize,
    },

    /// The upload request failed
    #[error("failed to upload file {}", .path.display())]
    #[diagnostic(code(skypost::upload::request))]
    Request {
        /// File path
        path: PathBuf,
        /// Underlying client error
        #[source]
        #[diagnostic_source]
        source: ClientError,
    },
}

/// An attachment that passed local validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File contents
    pub data: Vec<u8>,
    /// Content type picked from the file name
    pub mime_type: MimeType,
}

impl Attachment {
    /// Validate in-memory contents read from `path`.
    pub fn new(path: &Path, data: Vec<u8>) -> Result<Self, UploadError> {
        if data.len() > MAX_BLOB_SIZE {
            return Err(UploadError::TooLarge {
                path: path.to_path_buf(),
                size: data.len(),
            });
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        Ok(Self {
            data,
            mime_type: MimeType::from_file_name(&name),
        })
    }

    /// Read and validate a file.
    pub async fn read(path: &Path) -> Result<Self, UploadError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(path, data)
    }
}

impl<C: HttpClient + Sync> Agent<C> {
    /// Upload raw bytes as a blob.
    #[tracing::instrument(level = "debug", skip(self, data), fields(size = data.len()))]
    pub async fn upload_blob(&self, data: Vec<u8>, mime_type: MimeType) -> XrpcResult<BlobRef> {
        let request = UploadBlob::new().data(data).mime_type(mime_type).build();
        Ok(self.send_authed(&request).await?.blob)
    }

    /// Read, validate and upload each file in order, returning an images
    /// embed where every image carries the same alt text.
    ///
    /// The first failure aborts; nothing after it is read or uploaded.
    pub async fn upload_images<P>(
        &self,
        paths: impl IntoIterator<Item = P>,
        alt_text: &str,
    ) -> Result<Images, UploadError>
    where
        P: AsRef<Path>,
    {
        let mut images = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let attachment = Attachment::read(path).await?;
            tracing::info!(path = %path.display(), mime_type = %attachment.mime_type, size = attachment.data.len(), "uploading image");
            let blob = self
                .upload_blob(attachment.data, attachment.mime_type)
                .await
                .map_err(|source| UploadError::Request {
                    path: path.to_path_buf(),
                    source,
                })?;
            images.push(Image {
                alt: SmolStr::new(alt_text),
                image: blob,
            });
        }
        Ok(Images { images })
    }
}
