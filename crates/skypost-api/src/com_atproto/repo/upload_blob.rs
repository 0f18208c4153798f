use skypost_common::types::{BlobRef, MimeType};
use skypost_common::xrpc::{EncodeError, XrpcMethod, XrpcRequest};

/// Raw blob upload. The body is the bytes themselves, sent with the blob's
/// own content type rather than JSON.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq, bon::Builder)]
#[builder(start_fn = new)]
pub struct UploadBlob {
    #[serde(skip)]
    pub data: Vec<u8>,
    #[serde(skip)]
    pub mime_type: MimeType,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadBlobOutput {
    pub blob: BlobRef,
}

impl XrpcRequest for UploadBlob {
    const NSID: &'static str = "com.atproto.repo.uploadBlob";
    const METHOD: XrpcMethod = XrpcMethod::Procedure("*/*");
    type Output = UploadBlobOutput;

    fn encode_body(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.data.clone())
    }

    fn content_type(&self) -> Option<&str> {
        Some(self.mime_type.as_str())
    }
}
