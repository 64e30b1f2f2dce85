//! Collection utilities over subtitle records
//!
//! Pure filtering and ordering helpers; no I/O, no error conditions.

use crate::types::Subtitle;

/// Subtitles matching one language, in their original order
///
/// The wanted language goes through the same trim/lowercase normalization
/// the extractor applies to records; matching is exact, no fuzzy logic.
pub fn filter_by_language(subtitles: &[Subtitle], language: &str) -> Vec<Subtitle> {
    let wanted = language.trim().to_lowercase();
    subtitles
        .iter()
        .filter(|sub| sub.language == wanted)
        .cloned()
        .collect()
}

/// Subtitles ordered by ascending download count
///
/// The sort is stable: records with equal counts keep their original
/// relative (document) order.
pub fn order_by_downloads(subtitles: &[Subtitle]) -> Vec<Subtitle> {
    let mut ordered = subtitles.to_vec();
    ordered.sort_by_key(|sub| sub.downloads);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::AddictedClient;
    use proptest::prelude::*;

    fn subtitle(client: &AddictedClient, language: &str, downloads: u32, link: &str) -> Subtitle {
        Subtitle {
            language: language.to_string(),
            release: String::new(),
            downloads,
            link: link.to_string(),
            client: client.clone(),
        }
    }

    fn sample() -> Vec<Subtitle> {
        let client = AddictedClient::new().unwrap();
        vec![
            subtitle(&client, "english", 50, "/0"),
            subtitle(&client, "french", 10, "/1"),
            subtitle(&client, "english", 10, "/2"),
            subtitle(&client, "italian", 50, "/3"),
            subtitle(&client, "english", 3, "/4"),
        ]
    }

    #[test]
    fn test_filter_by_language() {
        let subs = sample();
        let english = filter_by_language(&subs, "english");
        let links: Vec<&str> = english.iter().map(|s| s.link.as_str()).collect();
        assert_eq!(links, ["/0", "/2", "/4"]);
    }

    #[test]
    fn test_filter_by_language_normalizes_query() {
        let subs = sample();
        assert_eq!(filter_by_language(&subs, " English ").len(), 3);
        assert_eq!(filter_by_language(&subs, "FRENCH").len(), 1);
    }

    #[test]
    fn test_filter_by_language_no_match() {
        let subs = sample();
        assert!(filter_by_language(&subs, "klingon").is_empty());
    }

    #[test]
    fn test_disjoint_filters_partition_the_input() {
        let subs = sample();
        let mut tagged: Vec<Subtitle> = filter_by_language(&subs, "english");
        tagged.extend(filter_by_language(&subs, "french"));
        tagged.extend(filter_by_language(&subs, "italian"));
        assert_eq!(tagged.len(), subs.len());
    }

    #[test]
    fn test_order_by_downloads_ascending() {
        let subs = sample();
        let ordered = order_by_downloads(&subs);
        let counts: Vec<u32> = ordered.iter().map(|s| s.downloads).collect();
        assert_eq!(counts, [3, 10, 10, 50, 50]);
    }

    #[test]
    fn test_order_by_downloads_is_stable() {
        let subs = sample();
        let ordered = order_by_downloads(&subs);
        // Ties keep document order: /1 before /2 (both 10), /0 before /3
        // (both 50).
        let links: Vec<&str> = ordered.iter().map(|s| s.link.as_str()).collect();
        assert_eq!(links, ["/4", "/1", "/2", "/0", "/3"]);
    }

    #[test]
    fn test_order_by_downloads_empty() {
        assert!(order_by_downloads(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_order_by_downloads_is_sorted_and_stable(
            records in prop::collection::vec((0u8..4, 0u32..20), 0..30)
        ) {
            let client = AddictedClient::new().unwrap();
            let langs = ["english", "french", "italian", "german"];
            let subs: Vec<Subtitle> = records
                .iter()
                .enumerate()
                .map(|(i, (lang, downloads))| {
                    subtitle(&client, langs[*lang as usize], *downloads, &format!("/{i}"))
                })
                .collect();

            let ordered = order_by_downloads(&subs);
            prop_assert_eq!(ordered.len(), subs.len());
            for pair in ordered.windows(2) {
                prop_assert!(pair[0].downloads <= pair[1].downloads);
                if pair[0].downloads == pair[1].downloads {
                    // Links encode the original index; ties keep it ascending.
                    let a: usize = pair[0].link[1..].parse().unwrap();
                    let b: usize = pair[1].link[1..].parse().unwrap();
                    prop_assert!(a < b);
                }
            }
        }

        #[test]
        fn prop_filter_preserves_relative_order(
            records in prop::collection::vec((0u8..3, 0u32..20), 0..30)
        ) {
            let client = AddictedClient::new().unwrap();
            let langs = ["english", "french", "italian"];
            let subs: Vec<Subtitle> = records
                .iter()
                .enumerate()
                .map(|(i, (lang, downloads))| {
                    subtitle(&client, langs[*lang as usize], *downloads, &format!("/{i}"))
                })
                .collect();

            let filtered = filter_by_language(&subs, "english");
            prop_assert!(filtered.iter().all(|s| s.language == "english"));
            for pair in filtered.windows(2) {
                let a: usize = pair[0].link[1..].parse().unwrap();
                let b: usize = pair[1].link[1..].parse().unwrap();
                prop_assert!(a < b);
            }
            let expected = subs.iter().filter(|s| s.language == "english").count();
            prop_assert_eq!(filtered.len(), expected);
        }
    }
}
