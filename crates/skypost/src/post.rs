use std::path::PathBuf;

use miette::Diagnostic;
use skypost_api::app_bsky::embed::images::Images;
use skypost_api::app_bsky::feed::post::{self, Post, PostEmbed, ReplyRef};
use skypost_api::com_atproto::repo::create_record::{CreateRecord, CreateRecordOutput};
use skypost_common::error::{ClientError, XrpcResult};
use skypost_common::http_client::HttpClient;
use skypost_common::types::Datetime;
use smol_str::SmolStr;
use thiserror::Error;

use crate::client::Agent;
use crate::identity::IdentityError;
use crate::richtext::RichText;
use crate::thread::ThreadError;
use crate::upload::UploadError;

/// Everything needed to publish one post.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct Draft {
    /// Post text; mentions and links are detected from it
    #[builder(into)]
    pub text: String,
    /// Reply target, as an `at://` URI or `https://bsky.app/` link
    #[builder(into)]
    pub parent_uri: Option<String>,
    /// Images to attach, in order
    #[builder(default)]
    pub images: Vec<PathBuf>,
    /// Alt text shared by every attached image
    #[builder(into, default)]
    pub alt_text: SmolStr,
    /// Override for `createdAt`; the current time when unset
    pub created_at: Option<Datetime>,
}

/// Failure of one stage of [`Agent::publish`].
#[derive(Debug, Error, Diagnostic)]
pub enum PublishError {
    /// Mention resolution failed
    #[error("Failed to resolve mentions")]
    Facets(
        #[from]
        #[diagnostic_source]
        IdentityError,
    ),

    /// Reply target couldn't be resolved
    #[error("Failed to get reply refs")]
    Thread(
        #[from]
        #[diagnostic_source]
        ThreadError,
    ),

    /// An attachment was rejected or failed to upload
    #[error("Failed to upload images")]
    Upload(
        #[from]
        #[diagnostic_source]
        UploadError,
    ),

    /// The record was rejected
    #[error("Failed to post")]
    Submit(
        #[from]
        #[diagnostic_source]
        ClientError,
    ),
}

/// Assemble a post record. Empty parts are left out of the record.
pub fn compose_post(
    rich: RichText,
    reply: Option<ReplyRef>,
    images: Option<Images>,
    created_at: Option<Datetime>,
) -> Post {
    let embed = images
        .filter(|i| !i.images.is_empty())
        .map(|i| PostEmbed::Images(Box::new(i)));
    Post::builder()
        .text(rich.text)
        .created_at(created_at.unwrap_or_else(Datetime::now))
        .maybe_facets(rich.facets.filter(|f| !f.is_empty()))
        .maybe_reply(reply)
        .maybe_embed(embed)
        .build()
}

impl<C: HttpClient + Sync> Agent<C> {
    /// Write a post to the logged-in account's repository.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn create_post(&self, post: Post) -> XrpcResult<CreateRecordOutput> {
        let request = CreateRecord::new()
            .repo(self.session_did()?)
            .collection(post::NSID)
            .record(post)
            .build();
        self.send_authed(&request).await
    }

    /// Run the whole pipeline for one draft: detect and resolve facets,
    /// resolve the reply thread, upload attachments, then create the record.
    ///
    /// Stops at the first failure; nothing is posted unless every stage
    /// succeeds.
    pub async fn publish(&self, draft: Draft) -> Result<CreateRecordOutput, PublishError> {
        let rich = RichText::parse(draft.text).build_async(self).await?;
        tracing::debug!(facets = rich.facets.as_ref().map_or(0, Vec::len), "facets resolved");

        let reply = match draft.parent_uri.as_deref() {
            Some(target) => Some(self.reply_refs(target).await?),
            None => None,
        };

        let images = if draft.images.is_empty() {
            None
        } else {
            Some(self.upload_images(&draft.images, &draft.alt_text).await?)
        };

        let post = compose_post(rich, reply, images, draft.created_at);
        let output = self.create_post(post).await?;
        tracing::info!(uri = %output.uri, cid = %output.cid, "post created");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skypost_api::com_atproto::repo::strong_ref::StrongRef;

    fn plain(text: &str) -> RichText {
        RichText {
            text: text.into(),
            facets: None,
        }
    }

    #[test]
    fn custom_timestamp_is_kept() {
        let at = Datetime::parse_custom("25/12/2023 14:30").unwrap();
        let post = compose_post(plain("hi"), None, None, Some(at));
        assert_eq!(post.created_at, at);
    }

    #[test]
    fn empty_parts_are_omitted() {
        let post = compose_post(
            RichText {
                text: "hi".into(),
                facets: Some(vec![]),
            },
            None,
            Some(Images { images: vec![] }),
            None,
        );
        let json = serde_json::to_value(&post).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("facets"));
        assert!(!obj.contains_key("embed"));
        assert!(!obj.contains_key("reply"));
        assert_eq!(obj["$type"], "app.bsky.feed.post");
        assert!(obj.contains_key("createdAt"));
    }

    #[test]
    fn reply_is_included() {
        let strong = StrongRef {
            uri: "at://did:plc:a/app.bsky.feed.post/1".into(),
            cid: "c1".into(),
        };
        let post = compose_post(
            plain("reply"),
            Some(ReplyRef {
                root: strong.clone(),
                parent: strong,
            }),
            None,
            None,
        );
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["reply"]["parent"]["cid"], "c1");
        assert_eq!(json["reply"]["root"]["uri"], "at://did:plc:a/app.bsky.feed.post/1");
    }
}
