use crate::issue_key::{IssueKey, IssuePattern};

/// Move every issue key in `original` to the end of the title, in `keys` order.
///
/// With no keys the title keeps a trailing space.
pub fn rewrite_title(original: &str, pattern: &IssuePattern, keys: &[IssueKey]) -> String {
    let stripped = pattern.strip_keys(original);
    let joined: Vec<&str> = keys.iter().map(IssueKey::as_str).collect();
    format!("{stripped} {}", joined.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrum() -> IssuePattern {
        IssuePattern::new("SCRUM").unwrap()
    }

    fn parse_all(keys: &[&str]) -> Vec<IssueKey> {
        keys.iter().map(|k| IssueKey::parse(k).unwrap()).collect()
    }

    #[test]
    fn test_no_duplicate_of_existing_key() {
        let title = rewrite_title("Fix bug SCRUM-3", &scrum(), &parse_all(&["SCRUM-3", "SCRUM-7"]));
        assert_eq!(title, "Fix bug SCRUM-3 SCRUM-7");
    }

    #[test]
    fn test_keys_moved_to_end() {
        let title = rewrite_title("SCRUM-9 Add login", &scrum(), &parse_all(&["SCRUM-2", "SCRUM-9"]));
        assert_eq!(title, " Add login SCRUM-2 SCRUM-9");
    }

    #[test]
    fn test_rerun_is_stable() {
        let keys = parse_all(&["SCRUM-2", "SCRUM-9"]);
        let once = rewrite_title("Add login SCRUM-9", &scrum(), &keys);
        let twice = rewrite_title(&once, &scrum(), &keys);
        assert_eq!(once, "Add login SCRUM-2 SCRUM-9");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_keys_leaves_trailing_space() {
        assert_eq!(rewrite_title("Refactor", &scrum(), &[]), "Refactor ");
    }

    #[test]
    fn test_non_ascii_digit_reference_stays_in_title() {
        let pattern = scrum();
        let keys: Vec<IssueKey> = pattern.collect(["Fix SCRUM-١٢ now"]).into_iter().collect();
        assert_eq!(rewrite_title("Fix SCRUM-١٢ now", &pattern, &keys), "Fix SCRUM-١٢ now ");
    }

    #[test]
    fn test_embedded_key_is_stripped_with_its_tail() {
        // XSCRUM-4 loses its SCRUM-4 tail, leaving the stray X.
        let title = rewrite_title("Tweak XSCRUM-4", &scrum(), &parse_all(&["SCRUM-4"]));
        assert_eq!(title, "Tweak X SCRUM-4");
    }
}
