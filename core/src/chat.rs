//! Sender display-name resolution for chat threads.
//!
//! Names are synthesized at read time, never stored per message: the
//! booker's name comes from the booking's client fields, the artist's from
//! whatever profile data the query path had loaded.

/// Display name for a `booker` message: "first last", trimmed.
///
/// Either side may be blank; the result never carries stray whitespace.
#[must_use]
pub fn booker_display_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name.trim(), last_name.trim())
        .trim()
        .to_string()
}

/// Display name for an `artist` message.
///
/// Three-level fallback: the sender's stored name, then a caller-supplied
/// fallback, then the literal `"Artist"`. The fallback chain exists because
/// the artist's live name may differ from what was true at send time and
/// because some query paths do not load the sender relation at all.
#[must_use]
pub fn artist_display_name(stored_name: Option<&str>, fallback: Option<&str>) -> String {
    for candidate in [stored_name, fallback] {
        if let Some(name) = candidate {
            let name = name.trim();
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }
    "Artist".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booker_name_joins_and_trims() {
        assert_eq!(booker_display_name("Dana", "Levi"), "Dana Levi");
        assert_eq!(booker_display_name("  Dana ", " Levi  "), "Dana Levi");
        assert_eq!(booker_display_name("Dana", ""), "Dana");
        assert_eq!(booker_display_name("", ""), "");
    }

    #[test]
    fn artist_name_falls_back_three_levels() {
        assert_eq!(
            artist_display_name(Some("DJ Nova"), Some("Old Name")),
            "DJ Nova"
        );
        assert_eq!(artist_display_name(None, Some("Old Name")), "Old Name");
        assert_eq!(artist_display_name(None, None), "Artist");
    }

    #[test]
    fn blank_candidates_are_skipped() {
        assert_eq!(artist_display_name(Some("  "), Some("Fallback")), "Fallback");
        assert_eq!(artist_display_name(Some(""), None), "Artist");
    }
}
