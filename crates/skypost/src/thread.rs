use miette::Diagnostic;
use serde::Deserialize;
use skypost_api::app_bsky::feed::post::ReplyRef;
use skypost_api::com_atproto::repo::get_record::{GetRecord, GetRecordOutput};
use skypost_common::error::{ClientError, DecodeError};
use skypost_common::http_client::HttpClient;
use skypost_common::types::RecordLocator;
use skypost_common::types::locator::LocatorError;
use thiserror::Error;

use crate::client::Agent;

/// Errors resolving the thread a reply belongs to.
#[derive(Debug, Error, Diagnostic)]
pub enum ThreadError {
    /// The reply target (or its root) isn't a usable locator
    #[error(transparent)]
    #[diagnostic(transparent)]
    Locator(#[from] LocatorError),

    /// Fetching a record failed, including non-success responses and
    /// responses missing `uri`/`cid`
    #[error("failed to fetch record {locator}")]
    #[diagnostic(code(skypost::thread::fetch))]
    Fetch {
        /// Record being fetched
        locator: RecordLocator,
        /// Underlying client error
        #[source]
        #[diagnostic_source]
        source: ClientError,
    },

    /// The record's `reply` field doesn't have the expected shape
    #[error("record {uri} has a malformed reply reference")]
    #[diagnostic(code(skypost::thread::malformed_reply))]
    MalformedReply {
        /// URI of the record
        uri: String,
        /// Decode failure
        #[source]
        #[diagnostic_source]
        source: DecodeError,
    },
}

/// The only part of a record's value thread resolution looks at.
#[derive(Deserialize)]
struct ReplyProbe {
    #[serde(default)]
    reply: Option<ReplyRef>,
}

impl<C: HttpClient + Sync> Agent<C> {
    /// Work out the root/parent pair for replying to `target`.
    ///
    /// `target` is an `at://` URI or a `https://bsky.app/` link. When the
    /// target is itself a reply, its thread root is fetched so the root
    /// reference carries the root record's own URI and CID; otherwise the
    /// target is both root and parent.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn reply_refs(&self, target: &str) -> Result<ReplyRef, ThreadError> {
        let locator = RecordLocator::parse(target)?;
        let parent = self.fetch_record(&locator).await?;

        let probe: ReplyProbe = serde_json::from_value(parent.value.clone()).map_err(|e| {
            ThreadError::MalformedReply {
                uri: parent.uri.to_string(),
                source: DecodeError::from(e),
            }
        })?;

        let root = match probe.reply {
            Some(reply) => {
                let root_locator = RecordLocator::parse(&reply.root.uri)?;
                tracing::debug!(root = %root_locator, "target is a reply, fetching thread root");
                self.fetch_record(&root_locator).await?.strong_ref()
            }
            None => parent.strong_ref(),
        };

        Ok(ReplyRef {
            root,
            parent: parent.strong_ref(),
        })
    }

    /// Fetch a record by locator.
    pub async fn fetch_record(
        &self,
        locator: &RecordLocator,
    ) -> Result<GetRecordOutput, ThreadError> {
        self.send(&GetRecord::from(locator))
            .await
            .map_err(|source| ThreadError::Fetch {
                locator: locator.clone(),
                source,
            })
    }
}
