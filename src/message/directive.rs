//! Control directives recognized in the draft message.

use std::sync::LazyLock;

use regex::Regex;

use super::extract::bounded;
use crate::constants::commit::SKIP_DIRECTIVE;

/// Git 自动生成的合并提交消息（含解决冲突后附加的注释行）
static MERGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^Merge branch '.*' into .*$").unwrap());

/// Whether the draft is an auto-generated merge message that must not be rewritten.
pub fn is_merge_conflict_resolution(message: &str) -> bool {
    MERGE_RE.is_match(bounded(message.trim()))
}

/// Whether the trimmed draft ends with ` -skipai` (any case).
///
/// The token only counts as a whole trailing word preceded by whitespace.
pub fn has_skip_directive(message: &str) -> bool {
    skip_directive_start(message).is_some()
}

/// Removes a trailing skip directive and the whitespace before it.
///
/// Messages without the directive are returned unchanged.
pub fn strip_skip_directive(message: &str) -> &str {
    match skip_directive_start(message) {
        Some(start) => message[..start].trim_end(),
        None => message,
    }
}

/// 指令在原消息中的起始字节位置
fn skip_directive_start(message: &str) -> Option<usize> {
    let trimmed = message.trim_end();
    let start = trimmed.len().checked_sub(SKIP_DIRECTIVE.len())?;
    if !trimmed.is_char_boundary(start) {
        return None;
    }

    let (head, tail) = trimmed.split_at(start);
    if !tail.eq_ignore_ascii_case(SKIP_DIRECTIVE) {
        return None;
    }
    head.chars()
        .next_back()
        .filter(|c| c.is_whitespace())
        .map(|_| start)
}
