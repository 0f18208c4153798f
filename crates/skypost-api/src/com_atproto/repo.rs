pub mod create_record;
pub mod get_record;
pub mod strong_ref;
pub mod upload_blob;
