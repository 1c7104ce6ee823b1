//! Small input-normalization helpers shared by the request DTO layer.

/// Trim, lowercase, drop empties, and de-duplicate a tag list while keeping
/// first-seen order. Tags render as filter chips in the SPA, so `"Verão"`
/// and `"verão "` must collapse to one chip.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in tags {
        let cleaned = tag.trim().to_lowercase();
        if cleaned.is_empty() {
            continue;
        }
        if !seen.contains(&cleaned) {
            seen.push(cleaned);
        }
    }
    seen
}

/// Normalize a social handle: trim whitespace and a single leading `@`.
///
/// Stored bare so lookups don't depend on how the handle was typed.
pub fn normalize_handle(handle: &str) -> String {
    handle.trim().trim_start_matches('@').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_trimmed_lowercased_and_deduped() {
        let input = vec![
            " Verão ".to_string(),
            "verão".to_string(),
            "PRAIA".to_string(),
            "".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(normalize_tags(&input), vec!["verão", "praia"]);
    }

    #[test]
    fn tag_order_is_first_seen() {
        let input = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(normalize_tags(&input), vec!["b", "a"]);
    }

    #[test]
    fn empty_tag_list_stays_empty() {
        assert!(normalize_tags(&[]).is_empty());
    }

    #[test]
    fn handle_loses_at_sign_and_whitespace() {
        assert_eq!(normalize_handle(" @marquente.oficial "), "marquente.oficial");
        assert_eq!(normalize_handle("marquente"), "marquente");
    }
}
