//! The "Jira issues linked" block kept at the top of a pull request body.
//!
//! ```text
//! Jira issues linked:
//!
//! * [SCRUM-12](<base>/browse/SCRUM-12) <summary>
//! * SCRUM-34 N/A
//! ---
//! <rest of original body>
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::jira::IssueRecord;

pub const SECTION_HEADER: &str = "Jira issues linked:";
pub const SEPARATOR: &str = "---";
const MISSING_SUMMARY: &str = "N/A";

/// A previously inserted section: header, blank line, then everything up to
/// the first `---` line. The closing line may end the body outright, which is
/// how the trimmed output of an earlier run looks when nothing followed it.
static EXISTING_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Jira issues linked:\n\n.*?\n---(?:\n|\z)").expect("section regex is valid")
});

/// Render resolved issues as a Markdown list. No issues, no section.
pub fn build_section(jira_base_url: &str, records: &[IssueRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut section = format!("{SECTION_HEADER}\n\n");
    for record in records {
        let key = &record.key;
        let line = match record.summary.as_deref().filter(|s| !s.is_empty()) {
            Some(summary) => format!("* [{key}]({jira_base_url}/browse/{key}) {summary}\n"),
            None => format!("* {key} {MISSING_SUMMARY}\n"),
        };
        section.push_str(&line);
    }
    section.trim_end().to_string()
}

/// Replace any earlier section in `original` with `new_section`.
///
/// The separator is emitted even when `new_section` is empty.
pub fn rewrite_body(original: Option<&str>, new_section: &str) -> String {
    let original = original.unwrap_or_default();
    let remaining = EXISTING_SECTION_RE.replace_all(original, "");
    format!("{new_section}\n{SEPARATOR}\n{remaining}")
        .trim()
        .to_string()
}
