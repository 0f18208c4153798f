use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Prefix of public web links to records.
pub const WEB_URL_PREFIX: &str = "https://bsky.app/";

/// Error parsing a record locator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum LocatorError {
    /// Not enough `/`-separated segments to name a record
    #[error("unhandled URI format: {0}")]
    #[diagnostic(
        code(skypost::locator::malformed),
        help(
            "expected at://<repo>/<collection>/<rkey> or https://bsky.app/profile/<repo>/post/<rkey>"
        )
    )]
    Malformed(String),
}

/// A reference to a stored record: repository, collection NSID and record key.
///
/// Parsed from either an `at://` URI or a public `https://bsky.app/` link.
/// Web links name collections by their path segment (`post`, `lists`,
/// `feed`), which is mapped to the collection NSID; any other segment is kept
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordLocator {
    /// Repository (DID or handle)
    pub repo: SmolStr,
    /// Collection NSID
    pub collection: SmolStr,
    /// Record key
    pub rkey: SmolStr,
}

impl RecordLocator {
    /// Parse a locator string.
    pub fn parse(uri: &str) -> Result<Self, LocatorError> {
        let parts: Vec<&str> = uri.split('/').collect();
        if parts.len() < 5 {
            return Err(LocatorError::Malformed(uri.to_owned()));
        }

        if uri.starts_with(WEB_URL_PREFIX) {
            // https: / "" / bsky.app / profile / <repo> / <segment> / <rkey>
            let [_, _, _, _, repo, segment, rkey, ..] = parts.as_slice() else {
                return Err(LocatorError::Malformed(uri.to_owned()));
            };
            return Ok(Self {
                repo: SmolStr::new(repo),
                collection: SmolStr::new(web_collection(segment)),
                rkey: SmolStr::new(rkey),
            });
        }

        Ok(Self {
            repo: SmolStr::new(parts[2]),
            collection: SmolStr::new(parts[3]),
            rkey: SmolStr::new(parts[4]),
        })
    }
}

fn web_collection(segment: &str) -> &str {
    match segment {
        "post" => "app.bsky.feed.post",
        "lists" => "app.bsky.graph.list",
        "feed" => "app.bsky.feed.generator",
        other => other,
    }
}

impl FromStr for RecordLocator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RecordLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at://{}/{}/{}", self.repo, self.collection, self.rkey)
    }
}
