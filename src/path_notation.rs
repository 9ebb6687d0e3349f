//! Conversion of route parameter markers into `{name}` placeholders.
//!
//! Routes are declared with `:name` for required segments and `?:name` for
//! optional ones. Documentation displays both as `{name}`.

const REQUIRED_MARKER: char = ':';
const OPTIONAL_MARKER: char = '?';

/// Translates a raw route path into its display form.
///
/// Segments are rewritten independently; empty segments and segments without
/// a marker pass through unchanged, so the number of `/`-separated segments
/// never changes.
///
/// ```
/// use swagger_docgen::path_notation::translate;
///
/// assert_eq!(translate("/users/:id/?:format"), "/users/{id}/{format}");
/// assert_eq!(translate("/a/?/b"), "/a/?/b");
/// ```
pub fn translate(raw_path: &str) -> String {
    raw_path
        .split('/')
        .map(translate_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn translate_segment(segment: &str) -> String {
    if let Some(name) = segment.strip_prefix(REQUIRED_MARKER) {
        return format!("{{{}}}", name);
    }
    // A lone `?` has nothing after it and stays as-is.
    if let Some(rest) = segment.strip_prefix(OPTIONAL_MARKER) {
        if let Some(name) = rest.strip_prefix(REQUIRED_MARKER) {
            return format!("{{{}}}", name);
        }
    }
    segment.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_and_optional_parameters() {
        assert_eq!(translate("/users/:id/?:format"), "/users/{id}/{format}");
    }

    #[test]
    fn test_path_without_markers() {
        assert_eq!(translate("/health"), "/health");
        assert_eq!(translate("/pets/{id}"), "/pets/{id}");
    }

    #[test]
    fn test_lone_optional_marker_is_unchanged() {
        assert_eq!(translate("/a/?/b"), "/a/?/b");
        assert_eq!(translate("?"), "?");
    }

    #[test]
    fn test_optional_marker_without_required_marker() {
        assert_eq!(translate("/search/?q"), "/search/?q");
    }

    #[test]
    fn test_empty_segments_are_preserved() {
        assert_eq!(translate("//a//:b/"), "//a//{b}/");
        assert_eq!(translate(""), "");
        assert_eq!(translate("/"), "/");
    }

    #[test]
    fn test_segment_count_is_preserved() {
        let paths = [
            "",
            "/",
            "/health",
            "/users/:id/?:format",
            "/a/?/b",
            "//x///:y",
            ":only",
            "/?:",
            "/:",
            "/?/?:/:/",
            "/ünï/:cödé",
        ];
        for path in paths {
            let translated = translate(path);
            assert_eq!(
                translated.split('/').count(),
                path.split('/').count(),
                "segment count changed for {:?} -> {:?}",
                path,
                translated
            );
        }
    }

    #[test]
    fn test_bare_markers_become_empty_placeholders() {
        assert_eq!(translate("/:"), "/{}");
        assert_eq!(translate("/?:"), "/{}");
    }

    #[test]
    fn test_translation_is_idempotent() {
        let once = translate("/orders/:order_id/items/?:item");
        assert_eq!(translate(&once), once);
    }
}
