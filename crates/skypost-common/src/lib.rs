//! Common types for skypost: the HTTP seam, XRPC request plumbing and the
//! handful of AT Protocol value types the client passes around.

#![warn(missing_docs)]
pub use smol_str;
pub use url;

pub mod error;
/// HTTP client abstraction used by skypost crates.
pub mod http_client;
/// Baseline AT Protocol data types.
pub mod types;
/// Stateless XRPC utilities.
pub mod xrpc;

use smol_str::SmolStr;

/// Authorization token for XRPC requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationToken {
    /// Bearer token (the session access JWT)
    Bearer(SmolStr),
}
