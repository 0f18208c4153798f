use super::*;

use std::collections::HashMap;

struct FixedResolver(HashMap<&'static str, &'static str>);

impl IdentityResolver for FixedResolver {
    async fn resolve_handle(&self, handle: &str) -> Result<Option<SmolStr>, IdentityError> {
        Ok(self.0.get(handle).map(|did| SmolStr::new(did)))
    }
}

fn mention(handle: &str, range: Range<usize>) -> Annotation {
    Annotation {
        range,
        kind: AnnotationKind::Mention {
            handle: handle.into(),
        },
    }
}

fn link(url: &str, range: Range<usize>) -> Annotation {
    Annotation {
        range,
        kind: AnnotationKind::Link { url: url.into() },
    }
}

#[test]
fn plain_text_has_no_annotations() {
    assert!(annotate("just some words, nothing special").is_empty());
    assert!(annotate("").is_empty());
    assert!(annotate("ftp://not.a.match and @ alone").is_empty());
}

#[test]
fn mention_then_link_with_byte_offsets() {
    let text = "hello @alice.bsky.social see http://x.co";
    let found = annotate(text);
    assert_eq!(
        found,
        vec![
            mention("alice.bsky.social", 6..24),
            link("http://x.co", 29..40),
        ]
    );
    assert_eq!(&text[6..24], "@alice.bsky.social");
    assert_eq!(&text[29..40], "http://x.co");
}

#[test]
fn mentions_come_first_regardless_of_position() {
    let found = annotate("https://a.example then @bob.test");
    assert_eq!(
        found,
        vec![
            mention("bob.test", 23..32),
            link("https://a.example", 0..17),
        ]
    );
}

#[test]
fn offsets_count_bytes_not_chars() {
    // "✨" is three bytes in UTF-8
    let plain = annotate("x @bob.test http://y.co");
    let shifted = annotate("✨ @bob.test http://y.co");
    assert_eq!(plain.len(), 2);
    assert_eq!(shifted.len(), 2);
    for (a, b) in plain.iter().zip(&shifted) {
        assert_eq!(b.range.start, a.range.start + 2);
        assert_eq!(b.range.end, a.range.end + 2);
    }

    let found = annotate("✨@bob.test");
    assert_eq!(found, vec![mention("bob.test", 3..12)]);
}

#[test]
fn non_ascii_letter_before_at_sign_still_allows_a_mention() {
    // 'é' is two bytes and not an ASCII word byte
    assert_eq!(detect_mentions("é@bob.test"), vec![mention("bob.test", 2..11)]);
}

#[test]
fn handles_stop_at_non_ascii_characters() {
    assert_eq!(detect_mentions("@café.test"), vec![mention("caf", 0..4)]);
}

#[test]
fn urls_run_through_non_ascii_whitespace() {
    let text = "http://x.co\u{3000}tail";
    assert_eq!(detect_urls(text), vec![link(text, 0..text.len())]);
    assert_eq!(
        detect_urls("http://x.co\ttail"),
        vec![link("http://x.co", 0..11)]
    );
}

#[test]
fn mid_word_at_sign_is_not_a_mention() {
    assert!(detect_mentions("mail me at someone@example.com").is_empty());
    assert_eq!(detect_mentions("a@b.@c"), vec![mention("c", 4..6)]);
    assert_eq!(
        detect_mentions("(@carol.test)"),
        vec![mention("carol.test", 1..12)]
    );
}

#[test]
fn handles_include_hyphens_and_trailing_dots() {
    assert_eq!(
        detect_mentions("hi @dash-y.test."),
        vec![mention("dash-y.test.", 3..16)]
    );
}

#[test]
fn urls_keep_trailing_punctuation() {
    assert_eq!(
        detect_urls("read https://example.com/a?b=c. now"),
        vec![link("https://example.com/a?b=c.", 5..31)]
    );
}

#[test]
fn overlapping_ranges_are_not_merged() {
    let text = "https://example.com/@dave.test";
    let found = annotate(text);
    assert_eq!(found.len(), 2);
    assert!(matches!(found[0].kind, AnnotationKind::Mention { .. }));
    assert_eq!(found[1].range, 0..text.len());
}

#[tokio::test]
async fn build_drops_unresolved_mentions() {
    let resolver = FixedResolver(HashMap::from([("alice.test", "did:plc:alice")]));
    let rich = RichText::parse("@alice.test and @ghost.test at https://x.co")
        .build_async(&resolver)
        .await
        .unwrap();

    let facets = rich.facets.expect("facets");
    assert_eq!(facets.len(), 2);
    assert_eq!(facets[0].index.byte_start, 0);
    assert_eq!(facets[0].index.byte_end, 11);
    assert_eq!(
        facets[0].features,
        vec![FacetFeature::Mention(Mention {
            did: "did:plc:alice".into()
        })]
    );
    assert_eq!(
        facets[1].features,
        vec![FacetFeature::Link(Link {
            uri: "https://x.co".into()
        })]
    );
}

#[tokio::test]
async fn build_without_matches_has_no_facets() {
    let resolver = FixedResolver(HashMap::new());
    let rich = RichText::parse("nothing to see")
        .build_async(&resolver)
        .await
        .unwrap();
    assert_eq!(rich.text, "nothing to see");
    assert!(rich.facets.is_none());
}
