//! Rich text utilities for Bluesky posts
//!
//! Detects `@mentions` and `http(s)://` links in post text and builds the
//! byte-indexed facets the post record carries.
//!
//! Detection is two independent regex passes over the text: every mention is
//! reported before every link, whatever their positions, and overlapping
//! ranges from the two passes are left as they are. All offsets are byte
//! offsets into the UTF-8 text.
//!
//! Character classes are ASCII-only: handles stop at the first non-ASCII
//! character, and URLs run through non-ASCII spaces.

use regex::Regex;
use skypost_api::app_bsky::richtext::facet::{ByteSlice, Facet, FacetFeature, Link, Mention};
use smol_str::SmolStr;
use std::ops::Range;
use std::sync::LazyLock;

use crate::identity::{IdentityError, IdentityResolver};

static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([0-9A-Za-z_.-]+)").expect("mention regex is valid"));

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\t\n\f\r ]+").expect("url regex is valid"));

fn is_ascii_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// A detected span of post text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Byte range in the text, `@` included for mentions
    pub range: Range<usize>,
    /// What was detected
    pub kind: AnnotationKind,
}

/// Payload of an [`Annotation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationKind {
    /// `@handle`, stored without the `@`
    Mention {
        /// The handle
        handle: SmolStr,
    },
    /// A URL, exactly as written
    Link {
        /// The URL
        url: SmolStr,
    },
}

/// Post text together with its facets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichText {
    /// The text, unchanged
    pub text: SmolStr,
    /// Facets, `None` when nothing was detected or resolved
    pub facets: Option<Vec<Facet>>,
}

impl RichText {
    /// Scan `text` for mentions and links.
    pub fn parse(text: impl Into<String>) -> RichTextBuilder {
        let text = text.into();
        let annotations = annotate(&text);
        RichTextBuilder { text, annotations }
    }
}

/// Parsed text whose mentions still need resolving to DIDs.
#[derive(Debug, Clone)]
pub struct RichTextBuilder {
    text: String,
    annotations: Vec<Annotation>,
}

impl RichTextBuilder {
    /// Resolve mentions and build the final facets.
    ///
    /// Mentions whose handle doesn't resolve are dropped and stay plain text.
    /// Any other resolver failure aborts the build.
    pub async fn build_async<R>(self, resolver: &R) -> Result<RichText, IdentityError>
    where
        R: IdentityResolver + Sync,
    {
        let mut facets = Vec::with_capacity(self.annotations.len());

        for annotation in self.annotations {
            let index = ByteSlice {
                byte_start: annotation.range.start,
                byte_end: annotation.range.end,
            };
            let feature = match annotation.kind {
                AnnotationKind::Mention { handle } => {
                    match resolver.resolve_handle(&handle).await? {
                        Some(did) => FacetFeature::Mention(Mention { did }),
                        None => continue,
                    }
                }
                AnnotationKind::Link { url } => FacetFeature::Link(Link { uri: url }),
            };
            facets.push(Facet {
                index,
                features: vec![feature],
            });
        }

        Ok(RichText {
            text: SmolStr::new(self.text),
            facets: (!facets.is_empty()).then_some(facets),
        })
    }
}

/// Detect mentions and links. Mentions come first, then links.
pub fn annotate(text: &str) -> Vec<Annotation> {
    let mut annotations = detect_mentions(text);
    annotations.extend(detect_urls(text));
    annotations
}

/// `@handle` tokens not preceded by an ASCII word byte.
pub fn detect_mentions(text: &str) -> Vec<Annotation> {
    let bytes = text.as_bytes();
    MENTION_REGEX
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            // handles never contain '@', so a rejected match can't hide a later one
            if whole.start() > 0 && is_ascii_word_byte(bytes[whole.start() - 1]) {
                return None;
            }
            let handle = cap.get(1)?;
            Some(Annotation {
                range: whole.range(),
                kind: AnnotationKind::Mention {
                    handle: SmolStr::new(handle.as_str()),
                },
            })
        })
        .collect()
}

/// `http://` and `https://` runs up to the next ASCII whitespace.
pub fn detect_urls(text: &str) -> Vec<Annotation> {
    URL_REGEX
        .find_iter(text)
        .map(|m| Annotation {
            range: m.range(),
            kind: AnnotationKind::Link {
                url: SmolStr::new(m.as_str()),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests;
