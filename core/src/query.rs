//! Query-string helpers.
//!
//! Reading follows `URLSearchParams.get`: pairs are
//! `application/x-www-form-urlencoded`, the first occurrence wins. Writing is
//! stricter than `URLSearchParams.set` about the parameters it does not own:
//! their segments are copied byte-for-byte instead of being re-encoded.

use url::form_urlencoded;

/// Strip the leading `?` of a `location.search` value, if any
#[must_use]
pub fn strip_question_mark(search: &str) -> &str {
    search.strip_prefix('?').unwrap_or(search)
}

/// Decoded key of a single `key=value` segment
fn segment_key(segment: &str) -> Option<String> {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
}

/// Decoded value of the first `key` parameter in `search`
///
/// ```
/// use todosync_core::query::get;
///
/// assert_eq!(get("?filter=not+done&page=2", "filter").as_deref(), Some("not done"));
/// assert_eq!(get("page=2", "filter"), None);
/// ```
#[must_use]
pub fn get(search: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(strip_question_mark(search).as_bytes())
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

/// Whether `search` carries a `key` parameter at all
#[must_use]
pub fn has(search: &str, key: &str) -> bool {
    form_urlencoded::parse(strip_question_mark(search).as_bytes()).any(|(name, _)| name == key)
}

/// Set `key` to `value`, returning the new query without a leading `?`
///
/// The first `key` segment is replaced where it stands and later duplicates
/// are dropped; when `key` is absent the pair is appended. All other segments
/// are kept exactly as they were written.
///
/// ```
/// use todosync_core::query::set;
///
/// assert_eq!(set("?page=2&filter=all", "filter", "not done"), "page=2&filter=not+done");
/// assert_eq!(set("", "filter", "all"), "filter=all");
/// ```
#[must_use]
pub fn set(search: &str, key: &str, value: &str) -> String {
    let pair = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();

    let mut segments: Vec<&str> = Vec::new();
    let mut written = false;

    for segment in strip_question_mark(search).split('&') {
        if segment.is_empty() {
            continue;
        }
        if segment_key(segment).as_deref() == Some(key) {
            if !written {
                segments.push(&pair);
                written = true;
            }
            continue;
        }
        segments.push(segment);
    }

    if !written {
        segments.push(&pair);
    }

    segments.join("&")
}

/// Assemble a same-document URL from its parts
///
/// `hash` is expected with its leading `#` (or empty).
#[must_use]
pub fn href(pathname: &str, query: &str, hash: &str) -> String {
    let query = strip_question_mark(query);
    if query.is_empty() {
        format!("{pathname}{hash}")
    } else {
        format!("{pathname}?{query}{hash}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_decodes_plus_as_space() {
        assert_eq!(get("?filter=not+done", "filter").as_deref(), Some("not done"));
        assert_eq!(get("?filter=not%20done", "filter").as_deref(), Some("not done"));
    }

    #[test]
    fn get_returns_first_occurrence() {
        assert_eq!(get("?filter=done&filter=all", "filter").as_deref(), Some("done"));
    }

    #[test]
    fn get_on_empty_search() {
        assert_eq!(get("", "filter"), None);
        assert_eq!(get("?", "filter"), None);
        assert!(!has("", "filter"));
    }

    #[test]
    fn has_sees_empty_values() {
        assert!(has("?filter=", "filter"));
        assert!(has("?filter", "filter"));
        assert_eq!(get("?filter", "filter").as_deref(), Some(""));
    }

    #[test]
    fn set_keeps_other_segments_verbatim() {
        let query = set("?q=a%2Bb&filter=done&sort=Date%20desc", "filter", "all");
        assert_eq!(query, "q=a%2Bb&filter=all&sort=Date%20desc");
    }

    #[test]
    fn set_appends_when_missing() {
        assert_eq!(set("?page=3", "filter", "done"), "page=3&filter=done");
    }

    #[test]
    fn set_drops_duplicate_keys() {
        assert_eq!(
            set("?filter=done&x=1&filter=all", "filter", "not done"),
            "filter=not+done&x=1"
        );
    }

    #[test]
    fn set_matches_encoded_keys() {
        assert_eq!(set("?fil%74er=done", "filter", "all"), "filter=all");
    }

    #[test]
    fn href_omits_empty_query() {
        assert_eq!(href("/", "", ""), "/");
        assert_eq!(href("/todos", "filter=all", "#top"), "/todos?filter=all#top");
        assert_eq!(href("/todos", "?filter=all", ""), "/todos?filter=all");
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn set_then_get_reads_back(
                others in prop::collection::vec(("[a-e]{1,3}", "[a-z0-9%]{0,6}"), 0..5),
                value in "[a-z ]{0,10}",
            ) {
                let search: Vec<String> = others
                    .iter()
                    .filter(|(key, _)| key != "f")
                    .map(|(key, val)| format!("{key}={val}"))
                    .collect();
                let search = search.join("&");

                let written = set(&search, "f", &value);

                prop_assert_eq!(get(&written, "f"), Some(value.clone()));
                // Foreign segments survive untouched and in order
                let kept: Vec<&str> = written.split('&').filter(|s| !s.starts_with("f=")).collect();
                let before: Vec<&str> = search.split('&').filter(|s| !s.is_empty()).collect();
                prop_assert_eq!(kept, before);
            }
        }
    }
}
