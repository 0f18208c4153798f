pub mod resolve_handle;
