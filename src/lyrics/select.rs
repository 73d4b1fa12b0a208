//! Active language policy.

use super::model::{LyricCollection, LyricTrack};

/// Language used when nothing is configured, and the second-chance fallback.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Resolve the configured preference; empty means `"en"`.
pub fn preferred_or_default(preferred: &str) -> &str {
    let preferred = preferred.trim();
    if preferred.is_empty() {
        FALLBACK_LANGUAGE
    } else {
        preferred
    }
}

/// Pick the track to display, first match wins:
/// 1. tag and preference contain one another (case-sensitive),
/// 2. the track tagged exactly `"en"`,
/// 3. the first track.
///
/// An empty descriptor never matches by substring: every preference
/// contains `""`, so an untagged frame would otherwise shadow the `"en"`
/// step whenever it comes first.
pub fn select<'a>(collection: &'a LyricCollection, preferred: &str) -> Option<&'a LyricTrack> {
    let preferred = preferred_or_default(preferred);

    collection
        .iter()
        .find(|t| {
            !t.language_tag.is_empty()
                && (preferred.contains(t.language_tag.as_str())
                    || t.language_tag.contains(preferred))
        })
        .or_else(|| collection.get(FALLBACK_LANGUAGE))
        .or_else(|| collection.iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::model::{Caption, LyricTrack};

    fn collection(tags: &[&str]) -> LyricCollection {
        tags.iter()
            .map(|t| LyricTrack::new(*t, vec![Caption::new(0, *t)]))
            .collect()
    }

    #[test]
    fn preferred_language_wins() {
        let c = collection(&["en", "fr", "es"]);
        assert_eq!(select(&c, "fr").unwrap().language_tag, "fr");
    }

    #[test]
    fn falls_back_to_english_when_preference_is_absent() {
        let c = collection(&["fr", "en", "es"]);
        assert_eq!(select(&c, "de").unwrap().language_tag, "en");
    }

    #[test]
    fn falls_back_to_first_track_without_english() {
        let c = collection(&["fr", "es"]);
        assert_eq!(select(&c, "de").unwrap().language_tag, "fr");
    }

    #[test]
    fn substring_matches_in_both_directions() {
        let c = collection(&["fr", "eng"]);
        assert_eq!(select(&c, "en").unwrap().language_tag, "eng");

        let c = collection(&["es", "fr"]);
        assert_eq!(select(&c, "fr-CA").unwrap().language_tag, "fr");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let c = collection(&["es", "FR"]);
        assert_eq!(select(&c, "fr").unwrap().language_tag, "es");
    }

    #[test]
    fn empty_preference_behaves_like_english() {
        let c = collection(&["fr", "en"]);
        assert_eq!(select(&c, "").unwrap().language_tag, "en");
    }

    #[test]
    fn empty_descriptor_does_not_shadow_english() {
        let c = collection(&["", "en"]);
        assert_eq!(select(&c, "fr").unwrap().language_tag, "en");

        let c = collection(&["", "es"]);
        assert_eq!(select(&c, "fr").unwrap().language_tag, "");
    }

    #[test]
    fn empty_collection_selects_nothing() {
        assert!(select(&LyricCollection::new(), "en").is_none());
    }
}
