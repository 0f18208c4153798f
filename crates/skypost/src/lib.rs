//! # skypost
//!
//! Post to Bluesky from the command line.
//!
//! The library half does the work the binary strings together:
//!
//! - [`richtext`] finds `@mentions` and URLs in post text and turns them into
//!   byte-indexed facets, resolving handles to DIDs on the way.
//! - [`thread`] turns a reply target into the root/parent pair a reply needs.
//! - [`upload`] validates and uploads image attachments.
//! - [`post`] assembles the `app.bsky.feed.post` record and submits it.
//!
//! All network access goes through an [`Agent`](client::Agent), which wraps
//! any [`HttpClient`](skypost_common::http_client::HttpClient), so tests can
//! swap in a canned-response client.
//!
//! ```no_run
//! use skypost::client::Agent;
//! use skypost::post::Draft;
//!
//! # async fn run() -> miette::Result<()> {
//! let pds = url::Url::parse("https://bsky.social").unwrap();
//! let mut agent = Agent::new(reqwest::Client::new(), pds);
//! agent.login("alice.bsky.social", "app-password").await?;
//!
//! let draft = Draft::builder()
//!     .text("hello @bob.bsky.social, see https://example.com")
//!     .build();
//! let output = agent.publish(draft).await?;
//! println!("{}", output.uri);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// The XRPC agent and session handling
pub mod client;
/// Handle → DID resolution
pub mod identity;
/// Post record composition and submission
pub mod post;
/// Mention and link detection
pub mod richtext;
/// Reply thread resolution
pub mod thread;
/// Image attachment upload
pub mod upload;

pub use skypost_api as api;
pub use skypost_common::*;
