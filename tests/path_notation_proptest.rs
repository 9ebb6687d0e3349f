//! Property-based tests for route path translation
//!
//! Paths are built from `/`-joined segments mixing required (`:name`) and
//! optional (`?:name`) markers, bare `?` and `:`, empty segments and
//! arbitrary text.

use proptest::prelude::*;
use swagger_docgen::path_notation::translate;

/// Generate a single path segment
fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just(":".to_string()),
        Just("?".to_string()),
        Just("?:".to_string()),
        "[a-z]{1,8}",
        ":[a-zA-Z_]{1,8}",
        "\\?:[a-zA-Z_]{1,8}",
        "[a-z?:{}]{0,6}",
        // Anything but a separator, including multi-byte characters
        "[^/]{0,8}",
    ]
}

/// Generate a raw route path
fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 0..8).prop_map(|segments| segments.join("/"))
}

proptest! {
    #[test]
    fn test_segment_count_is_preserved(path in path_strategy()) {
        let translated = translate(&path);
        prop_assert_eq!(translated.split('/').count(), path.split('/').count());
    }

    #[test]
    fn test_unmarked_segments_are_unchanged(path in path_strategy()) {
        let translated = translate(&path);
        for (raw, display) in path.split('/').zip(translated.split('/')) {
            if !raw.starts_with(':') && !raw.starts_with("?:") {
                prop_assert_eq!(raw, display);
            }
        }
    }

    #[test]
    fn test_marked_segments_become_placeholders(name in "[a-zA-Z_][a-zA-Z0-9_]{0,8}") {
        prop_assert_eq!(translate(&format!("/a/:{}", name)), format!("/a/{{{}}}", name));
        prop_assert_eq!(translate(&format!("/a/?:{}", name)), format!("/a/{{{}}}", name));
    }

    #[test]
    fn test_translation_is_idempotent(path in path_strategy()) {
        let once = translate(&path);
        prop_assert_eq!(translate(&once), once);
    }
}
