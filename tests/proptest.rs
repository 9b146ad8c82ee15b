//! Property-based tests for tootpack.
//!
//! These tests generate random inputs to find edge cases.

use proptest::prelude::*;
use serde_json::{Value, json};

use tootpack::classify::{
    Audience, LikedOrigin, actor_prefix, classify_liked_url, detect_orphan,
};
use tootpack::activity::Note;
use tootpack::config::RenderConfig;
use tootpack::core::render::render_document_with_stats;
use tootpack::core::summary::summarize_outbox;
use tootpack::core::tally::Tally;

/// Generate an addressee URL using fast strategies (no regex!)
fn arb_addressee() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "https://www.w3.org/ns/activitystreams#Public".to_string(),
        "https://me.example/users/me/followers".to_string(),
        "https://other.example/users/bob".to_string(),
        "https://other.example/users/followers/x".to_string(),
        String::new(),
    ])
}

/// Generate a random outbox record: valid posts, boosts and junk.
fn arb_record() -> impl Strategy<Value = Value> {
    prop_oneof![
        arb_addressee().prop_map(|to| json!({
            "type": "Create",
            "published": "2021-05-05T05:05:05Z",
            "object": {"to": [to], "content": "<p>x</p>"}
        })),
        prop::sample::select(vec!["alice", "bob", "иван"]).prop_map(|user| json!({
            "type": "Announce",
            "cc": [format!("https://h.example/users/{}", user)],
            "object": format!("https://h.example/users/{}/statuses/1", user)
        })),
        Just(json!({"type": "Create"})),
        Just(json!({"type": "Create", "object": {"to": [], "content": ""}})),
        Just(json!(17)),
        Just(json!({"type": "Like"})),
    ]
}

fn arb_records(max_len: usize) -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(arb_record(), 0..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // CLASSIFIER PROPERTIES
    // ============================================

    /// Stripping the `/statuses` suffix twice changes nothing
    #[test]
    fn actor_prefix_is_idempotent(url in ".*") {
        let once = actor_prefix(&url);
        prop_assert_eq!(actor_prefix(once), once);
    }

    /// The prefix never contains the separator
    #[test]
    fn actor_prefix_has_no_statuses(url in ".*") {
        prop_assert!(!actor_prefix(&url).contains("/statuses"));
    }

    /// Liked-item classification accepts any string
    #[test]
    fn liked_origin_never_panics(url in ".*") {
        let origin = classify_liked_url(&url);
        prop_assert!(!origin.label().is_empty());
    }

    /// `/users/` wins over every later pattern
    #[test]
    fn users_pattern_has_priority(
        host in "[a-z]{1,10}",
        other in prop::sample::select(vec!["/p/", "/objects/", "/item/", "/videos/", "/notes/"]),
    ) {
        let url = format!("https://{}.example{}x/users/alice/statuses/1", host, other);
        let is_mastodon = matches!(classify_liked_url(&url), LikedOrigin::Mastodon { .. });
        prop_assert!(is_mastodon);
    }

    /// Orphan detection accepts any content
    #[test]
    fn orphan_detection_never_panics(content in ".*") {
        let note = Note { content: Some(content), ..Note::default() };
        let _ = detect_orphan(&note);
    }

    // ============================================
    // PIPELINE PROPERTIES
    // ============================================

    /// Every creation lands in exactly one audience bucket
    #[test]
    fn audience_partitions_creations(records in arb_records(40)) {
        let stats = summarize_outbox(&records);
        let sum = stats.audience.get(&Audience::Public)
            + stats.audience.get(&Audience::FollowersOnly)
            + stats.audience.get(&Audience::Direct);
        prop_assert_eq!(sum, stats.creations);
    }

    /// Every record is either counted or skipped
    #[test]
    fn records_are_counted_or_skipped(records in arb_records(40)) {
        let stats = summarize_outbox(&records);
        prop_assert_eq!(stats.total_records, records.len());
        prop_assert_eq!(stats.creations + stats.reshares + stats.skipped.total(), records.len());
    }

    /// Original toots plus replies equals creations
    #[test]
    fn threads_partition_creations(records in arb_records(40)) {
        let stats = summarize_outbox(&records);
        prop_assert_eq!(stats.originals + stats.replies(), stats.creations);
    }

    /// One separator per rendered entry
    #[test]
    fn render_emits_one_separator_per_entry(records in arb_records(40)) {
        let (html, stats) = render_document_with_stats(&records, &RenderConfig::default());
        // the head carries one separator of its own
        prop_assert_eq!(html.matches("<hr/>").count(), 1 + stats.rendered);
        prop_assert_eq!(stats.rendered + stats.skipped, records.len());
    }

    /// The page never holds fewer entries than the summary counted
    #[test]
    fn render_keeps_every_counted_record(records in arb_records(40)) {
        let summary = summarize_outbox(&records);
        let (_, stats) = render_document_with_stats(&records, &RenderConfig::default());
        prop_assert!(stats.rendered >= summary.creations + summary.reshares);
    }

    // ============================================
    // TALLY PROPERTIES
    // ============================================

    /// most_common is sorted by count and never longer than asked
    #[test]
    fn most_common_sorted(keys in prop::collection::vec(0u8..20, 0..100), n in 0usize..30) {
        let tally: Tally<u8> = keys.iter().copied().collect();
        let top = tally.most_common(n);
        prop_assert!(top.len() <= n);
        prop_assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    /// Totals match the input length
    #[test]
    fn tally_total_matches_input(keys in prop::collection::vec(0u8..20, 0..100)) {
        let tally: Tally<u8> = keys.iter().copied().collect();
        prop_assert_eq!(tally.total(), keys.len());
    }

    /// The threshold table contains at least min(rank, distinct) rows
    #[test]
    fn threshold_rows_cover_rank(keys in prop::collection::vec(0u8..40, 0..200), rank in 1usize..30) {
        let tally: Tally<u8> = keys.iter().copied().collect();
        let rows = tally.at_or_above_rank(rank);
        prop_assert!(rows.len() >= rank.min(tally.distinct()));
        if let Some((_, lowest)) = rows.last() {
            prop_assert!(tally.iter().filter(|(_, n)| n > lowest).count() <= rows.len());
        }
    }
}
