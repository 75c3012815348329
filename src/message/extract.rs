//! Reference extraction from branch names and draft messages.
//!
//! Patterns are compiled once. Inputs are cut to
//! [`MATCH_INPUT_LIMIT`](crate::constants::commit::MATCH_INPUT_LIMIT) bytes
//! before matching so a huge branch name or message costs bounded time.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::commit::MATCH_INPUT_LIMIT;

/// `123-...`、`feature/123-...`、`feature/123`
static ISSUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-zA-Z]+/)?(\d+)(?:-|$)").unwrap());

/// `PROJ-123`、`proj123`，不区分大小写
static TICKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([A-Z]+)-?(\d+)").unwrap());

static VERSION_BUMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\+semver:\s*(breaking|major|feature|minor|fix|patch|none|skip)").unwrap()
});

/// 同一指令连同前面的空白一起删除，避免留下双空格
static VERSION_BUMP_WITH_LEADING_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[ \t]*\+semver:\s*(breaking|major|feature|minor|fix|patch|none|skip)")
        .unwrap()
});

/// Cuts `input` to at most `MATCH_INPUT_LIMIT` bytes on a char boundary.
pub(crate) fn bounded(input: &str) -> &str {
    if input.len() <= MATCH_INPUT_LIMIT {
        return input;
    }
    let mut end = MATCH_INPUT_LIMIT;
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    &input[..end]
}

/// GitHub-style issue number at the start of a branch name.
///
/// ```
/// use aicommit_rs::message::extract_issue_number;
///
/// assert_eq!(extract_issue_number("feature/123-add-login").as_deref(), Some("123"));
/// assert_eq!(extract_issue_number("main"), None);
/// ```
pub fn extract_issue_number(branch: &str) -> Option<String> {
    ISSUE_RE
        .captures(bounded(branch))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Jira-style ticket id anywhere in a branch name, normalized to `KEY-NUMBER`.
///
/// ```
/// use aicommit_rs::message::extract_ticket_id;
///
/// assert_eq!(extract_ticket_id("hotfix/xpto-1234-fix").as_deref(), Some("XPTO-1234"));
/// ```
pub fn extract_ticket_id(branch: &str) -> Option<String> {
    let caps = TICKET_RE.captures(bounded(branch))?;
    let key = caps.get(1)?.as_str().to_uppercase();
    let number = caps.get(2)?.as_str();
    Some(format!("{}-{}", key, number))
}

/// First `+semver: <level>` directive, returned verbatim.
pub fn extract_version_bump(message: &str) -> Option<String> {
    VERSION_BUMP_RE
        .find(bounded(message))
        .map(|m| m.as_str().to_string())
}

/// Removes every `+semver:` directive from `text` and trims the result.
///
/// ```
/// use aicommit_rs::message::strip_version_bumps;
///
/// assert_eq!(strip_version_bumps("+semver: minor Initial commit"), "Initial commit");
/// ```
pub fn strip_version_bumps(text: &str) -> String {
    VERSION_BUMP_WITH_LEADING_SPACE_RE
        .replace_all(text, "")
        .trim()
        .to_string()
}
