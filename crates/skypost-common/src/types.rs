/// Opaque blob references and MIME types
pub mod blob;
/// Post timestamps
pub mod datetime;
/// Record locators (`at://` URIs and bsky.app links)
pub mod locator;

pub use blob::{BlobRef, MimeType};
pub use datetime::Datetime;
pub use locator::RecordLocator;
