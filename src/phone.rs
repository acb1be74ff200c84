use lazy_regex::regex;

/// Picks the first candidate slot containing something shaped like a
/// North-American phone number and returns the matched substring.
///
/// Candidates are tried strictly in slot order; within a candidate only the
/// first match counts. `+` prefixes are removed before matching. No
/// plausibility check beyond the pattern itself.
pub fn first_phone(candidates: &[Option<String>]) -> Option<String> {
    let pattern = regex!(
        r"\d{3}[-.\s]??\d{3}[-.\s]??\d{4}|\(\d{3}\)\s*\d{3}[-.\s]??\d{4}|\d{3}[-.\s]??\d{4}"
    );

    for candidate in candidates.iter().flatten() {
        let cleaned = candidate.replace('+', "");
        if let Some(m) = pattern.find(&cleaned) {
            return Some(m.as_str().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slots(s: [Option<&str>; 4]) -> Vec<Option<String>> {
        s.into_iter().map(|c| c.map(str::to_string)).collect()
    }

    #[test]
    fn earliest_slot_wins() {
        let candidates = slots([
            None,
            Some("call (520) 555-0100 now"),
            Some("520.555.0101"),
            None,
        ]);
        assert_eq!(first_phone(&candidates), Some("(520) 555-0100".to_string()));
    }

    #[test]
    fn no_candidate_matches() {
        let candidates = slots([None, Some("no number here"), None, None]);
        assert_eq!(first_phone(&candidates), None);
    }

    #[test]
    fn empty_slots() {
        assert_eq!(first_phone(&[]), None);
        assert_eq!(first_phone(&slots([None, None, None, None])), None);
    }

    #[test]
    fn plus_prefix_is_stripped_before_matching() {
        let candidates = slots([Some("+1 520 555 0100"), None, None, None]);
        assert_eq!(first_phone(&candidates), Some("520 555 0100".to_string()));
    }

    #[test]
    fn match_is_found_inside_surrounding_text() {
        let candidates = slots([Some("Open 24 hours · 520-555-0100"), None, None, None]);
        assert_eq!(first_phone(&candidates), Some("520-555-0100".to_string()));
    }

    #[test]
    fn dotted_separators() {
        let candidates = slots([Some("520.555.0101"), None, None, None]);
        assert_eq!(first_phone(&candidates), Some("520.555.0101".to_string()));
    }

    #[test]
    fn seven_digit_number_still_matches() {
        let candidates = slots([Some("555-0199"), None, None, None]);
        assert_eq!(first_phone(&candidates), Some("555-0199".to_string()));
    }
}
