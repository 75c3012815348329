//! Post-processing applied to backend output and to skipped drafts.

use super::extract::{
    extract_issue_number, extract_ticket_id, extract_version_bump, strip_version_bumps,
};
use super::provider::RepositoryProvider;

/// 后端偶尔会原样返回模板里的占位类型
const PLACEHOLDER_TYPE_PREFIX: &str = "type - ";

/// Turns generated (or draft) text into the final commit message.
///
/// 1. drops a literal `type - ` prefix
/// 2. prefixes `#<issue> ` on GitHub, `[<TICKET>] ` elsewhere, unless already present
/// 3. when `original_message` carries a `+semver:` directive, removes every
///    directive from the text and appends the first one of `original_message`
///
/// Applying it twice with the same inputs gives the same result as applying it once.
pub fn post_process(
    text: &str,
    branch: &str,
    original_message: &str,
    provider: RepositoryProvider,
) -> String {
    let text = text.strip_prefix(PLACEHOLDER_TYPE_PREFIX).unwrap_or(text);

    let Some(directive) = extract_version_bump(original_message) else {
        return apply_reference_prefix(text, branch, provider);
    };

    // 作者写的级别优先，后端回显的指令一律丢弃
    let mut result = apply_reference_prefix(&strip_version_bumps(text), branch, provider);
    if !result.is_empty() {
        result.push(' ');
    }
    result.push_str(&directive);
    result
}

fn apply_reference_prefix(text: &str, branch: &str, provider: RepositoryProvider) -> String {
    if provider.is_github() {
        if let Some(issue) = extract_issue_number(branch)
            && !starts_with_issue(text, &issue)
        {
            return format!("#{} {}", issue, text);
        }
    } else if let Some(ticket) = extract_ticket_id(branch)
        && !starts_with_ticket(text, &ticket)
    {
        return format!("[{}] {}", ticket, text);
    }
    text.to_string()
}

/// `#123` 后面不能紧跟数字，避免把 `#1234` 当成 `#123`
fn starts_with_issue(text: &str, issue: &str) -> bool {
    text.strip_prefix('#')
        .and_then(|rest| rest.strip_prefix(issue))
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_digit()))
}

fn starts_with_ticket(text: &str, ticket: &str) -> bool {
    let marker = format!("[{}]", ticket);
    text.get(..marker.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(&marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GH: RepositoryProvider = RepositoryProvider::GitHub;
    const GL: RepositoryProvider = RepositoryProvider::GitLab;

    #[test]
    fn test_strips_placeholder_type() {
        assert_eq!(post_process("type - add login", "main", "", GH), "add login");
        assert_eq!(post_process("feat - add login", "main", "", GH), "feat - add login");
        assert_eq!(post_process("type -", "main", "", GH), "type -");
    }

    #[test]
    fn test_github_issue_prefix() {
        assert_eq!(
            post_process("feat - add login", "feature/123-login", "", GH),
            "#123 feat - add login"
        );
    }

    #[test]
    fn test_github_ignores_ticket_ids() {
        assert_eq!(
            post_process("feat - add login", "feature/TEST-123-login", "", GH),
            "feat - add login"
        );
    }

    #[test]
    fn test_ticket_prefix_for_other_providers() {
        assert_eq!(
            post_process("Initial commit", "feature/TEST-123-my-branch-name", "", GL),
            "[TEST-123] Initial commit"
        );
        assert_eq!(
            post_process("Initial commit", "feature/123-x", "", GL),
            "Initial commit"
        );
    }

    #[test]
    fn test_existing_prefix_not_duplicated() {
        assert_eq!(
            post_process("#123 Initial commit", "feature/123-x", "", GH),
            "#123 Initial commit"
        );
        assert_eq!(
            post_process("[test-123] Initial commit", "feature/TEST-123-x", "", GL),
            "[test-123] Initial commit"
        );
    }

    #[test]
    fn test_longer_issue_number_is_not_a_match() {
        assert_eq!(
            post_process("#1234 Initial commit", "feature/123-x", "", GH),
            "#123 #1234 Initial commit"
        );
    }

    #[test]
    fn test_version_bump_suffix() {
        assert_eq!(
            post_process(
                "fix - handle nulls",
                "main",
                "Fix nulls +semver: patch",
                GH
            ),
            "fix - handle nulls +semver: patch"
        );
    }

    #[test]
    fn test_version_bump_first_directive_only() {
        assert_eq!(
            post_process("x", "main", "+semver: minor and +semver: major", GL),
            "x +semver: minor"
        );
    }

    #[test]
    fn test_version_bump_not_duplicated_when_already_in_text() {
        assert_eq!(
            post_process("Bump +semver: minor", "main", "Bump +semver: minor", GL),
            "Bump +semver: minor"
        );
    }

    #[test]
    fn test_author_version_bump_replaces_backend_echo() {
        assert_eq!(
            post_process("feat - bump +semver: minor", "main", "Bump deps +semver: major", GL),
            "feat - bump +semver: major"
        );
    }

    #[test]
    fn test_leading_version_bump_moves_to_end() {
        assert_eq!(
            post_process(
                "+semver: minor Initial commit",
                "main",
                "+semver: minor Initial commit -skipai",
                GL
            ),
            "Initial commit +semver: minor"
        );
        assert_eq!(
            post_process(
                "+semver: minor Initial commit",
                "feature/TEST-9-x",
                "+semver: minor Initial commit -skipai",
                GL
            ),
            "[TEST-9] Initial commit +semver: minor"
        );
    }

    #[test]
    fn test_version_bump_without_other_text() {
        assert_eq!(post_process("+semver: patch", "main", "+semver: patch", GL), "+semver: patch");
    }

    #[test]
    fn test_post_process_is_idempotent() {
        let cases = [
            ("type - add login", "feature/123-x", "draft +semver: minor", GH),
            ("Initial commit", "feature/TEST-123-my-branch", "", GL),
            ("#123 Initial commit", "feature/123-x", "", GH),
            ("chore - deps", "xpto1234", "+semver: none", RepositoryProvider::Unidentified),
            ("plain", "main", "", GH),
            ("+semver: minor Initial commit", "feature/TEST-9-x", "+semver: minor x", GL),
            ("feat - bump +semver: minor", "main", "Bump +semver: major", GL),
        ];
        for (text, branch, original, provider) in cases {
            let once = post_process(text, branch, original, provider);
            let twice = post_process(&once, branch, original, provider);
            assert_eq!(once, twice, "text: {}", text);
        }
    }
}
