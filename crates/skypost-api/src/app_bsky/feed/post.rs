use skypost_common::smol_str::SmolStr;
use skypost_common::types::Datetime;

use crate::app_bsky::embed::images::Images;
use crate::app_bsky::richtext::facet::Facet;
use crate::com_atproto::repo::strong_ref::StrongRef;

/// Collection NSID for posts.
pub const NSID: &str = "app.bsky.feed.post";

///Record containing a Bluesky post.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, bon::Builder)]
#[serde(tag = "$type", rename = "app.bsky.feed.post")]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[builder(default = Datetime::now())]
    pub created_at: Datetime,
    #[serde(skip_serializing_if = "std::option::Option::is_none")]
    pub embed: std::option::Option<PostEmbed>,
    /// Annotations of text (mentions, URLs, hashtags, etc)
    #[serde(skip_serializing_if = "std::option::Option::is_none")]
    pub facets: std::option::Option<Vec<Facet>>,
    #[serde(skip_serializing_if = "std::option::Option::is_none")]
    pub reply: std::option::Option<ReplyRef>,
    #[builder(into)]
    pub text: SmolStr,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "$type")]
pub enum PostEmbed {
    #[serde(rename = "app.bsky.embed.images")]
    Images(Box<Images>),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRef {
    pub parent: StrongRef,
    pub root: StrongRef,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_bsky::embed::images::Image;
    use crate::app_bsky::richtext::facet::{ByteSlice, FacetFeature, Link};

    fn created() -> Datetime {
        Datetime::parse_custom("25/12/2023 14:30").unwrap()
    }

    #[test]
    fn bare_post_omits_optional_fields() {
        let post = Post::builder().text("hello").created_at(created()).build();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "$type": "app.bsky.feed.post",
                "text": "hello",
                "createdAt": "2023-12-25T14:30:00Z"
            })
        );
    }

    #[test]
    fn full_post_serializes_typed_unions() {
        let blob: skypost_common::types::BlobRef =
            serde_json::from_value(serde_json::json!({"$type": "blob", "size": 3})).unwrap();
        let root = StrongRef {
            uri: "at://did:plc:a/app.bsky.feed.post/1".into(),
            cid: "cid1".into(),
        };
        let post = Post::builder()
            .text("see http://x.co")
            .created_at(created())
            .facets(vec![Facet {
                index: ByteSlice {
                    byte_start: 4,
                    byte_end: 15,
                },
                features: vec![FacetFeature::Link(Link {
                    uri: "http://x.co".into(),
                })],
            }])
            .reply(ReplyRef {
                parent: root.clone(),
                root,
            })
            .embed(PostEmbed::Images(Box::new(Images {
                images: vec![Image {
                    alt: "a cat".into(),
                    image: blob,
                }],
            })))
            .build();

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["facets"][0]["index"]["byteStart"], 4);
        assert_eq!(
            json["facets"][0]["features"][0]["$type"],
            "app.bsky.richtext.facet#link"
        );
        assert_eq!(json["embed"]["$type"], "app.bsky.embed.images");
        assert_eq!(json["embed"]["images"][0]["alt"], "a cat");
        assert_eq!(json["reply"]["root"]["cid"], "cid1");

        let back: Post = serde_json::from_value(json).unwrap();
        assert_eq!(back, post);
    }
}
