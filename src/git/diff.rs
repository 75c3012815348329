use crate::constants::commit::LOCKFILES;

const DIFF_HEADER: &str = "diff --git ";

/// 单个文件的 diff 片段
///
/// `content` 是原始 diff 的一个切片（从 "diff --git" 到下一个文件边界），
/// 包括行尾换行符，保证重新拼接后与原文逐字节一致。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSection<'a> {
    /// `b/` 一侧的目标路径；第一个 header 之前的内容为 `None`
    pub path: Option<String>,
    pub content: &'a str,
}

/// 从 `diff --git a/<path> b/<path>` 中提取 `b/` 一侧的路径
pub fn extract_target_path(line: &str) -> Option<String> {
    let rest = line.strip_prefix(DIFF_HEADER)?;
    let rest = rest.trim_end_matches(['\n', '\r']);

    // 处理带引号的路径：diff --git "a/path with spaces.rs" "b/path with spaces.rs"
    if let Some(stripped) = rest.strip_suffix('"')
        && let Some(start) = stripped.rfind("\"b/")
    {
        return Some(stripped[start + 3..].to_string());
    }

    // 通过 " b/" 分隔符定位 a/ 和 b/ 的边界，避免空格路径被截断。
    if rest.starts_with("a/")
        && let Some(b_pos) = rest.find(" b/")
    {
        return Some(rest[b_pos + 3..].to_string());
    }

    // Fallback：取最后一个以 b/ 开头的字段
    rest.split_whitespace()
        .rev()
        .find_map(|s| s.strip_prefix("b/"))
        .map(|s| s.to_string())
}

/// 将原始 diff 文本按文件边界拆分，保持原始顺序和字节内容
pub fn split_diff_by_file(diff: &str) -> Vec<FileSection<'_>> {
    let mut sections = Vec::new();
    let mut start = 0usize;
    let mut offset = 0usize;

    for line in diff.split_inclusive('\n') {
        if line.starts_with(DIFF_HEADER) && offset > start {
            sections.push(section(&diff[start..offset]));
            start = offset;
        }
        offset += line.len();
    }

    if start < diff.len() {
        sections.push(section(&diff[start..]));
    }

    sections
}

fn section(content: &str) -> FileSection<'_> {
    let path = content
        .lines()
        .next()
        .filter(|first| first.starts_with(DIFF_HEADER))
        .and_then(extract_target_path);
    FileSection { path, content }
}

/// 路径是否以已知 lockfile 名称结尾
pub fn is_lockfile(path: &str) -> bool {
    LOCKFILES.iter().any(|name| path.ends_with(name))
}

/// 丢弃属于 lockfile 的文件片段，其余片段逐字节保留
pub fn filter_lockfile_hunks(diff: &str) -> String {
    let mut dropped = 0usize;
    let filtered: String = split_diff_by_file(diff)
        .into_iter()
        .filter(|section| match section.path.as_deref() {
            Some(path) if is_lockfile(path) => {
                tracing::debug!("Dropping lockfile hunk: {}", path);
                dropped += 1;
                false
            }
            _ => true,
        })
        .map(|section| section.content)
        .collect();

    if dropped > 0 {
        tracing::debug!(
            "Lockfile filter removed {} hunk(s), {} -> {} bytes",
            dropped,
            diff.len(),
            filtered.len()
        );
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SRC_HUNK: &str = "diff --git a/src/main.rs b/src/main.rs\n\
                            index 1234567..abcdefg 100644\n\
                            --- a/src/main.rs\n\
                            +++ b/src/main.rs\n\
                            @@ -1,3 +1,4 @@\n \
                            fn main() {\n\
                            +    println!(\"Hello\");\n \
                            }\n";

    const LOCK_HUNK: &str = "diff --git a/package-lock.json b/package-lock.json\n\
                             --- a/package-lock.json\n\
                             +++ b/package-lock.json\n\
                             @@ -1 +1 @@\n\
                             -\"version\": \"1.0.0\"\n\
                             +\"version\": \"1.0.1\"\n";

    #[test]
    fn test_extract_target_path_simple() {
        assert_eq!(
            extract_target_path("diff --git a/src/main.rs b/src/main.rs").as_deref(),
            Some("src/main.rs")
        );
    }

    #[test]
    fn test_extract_target_path_rename() {
        assert_eq!(
            extract_target_path("diff --git a/old.lock b/Cargo.lock").as_deref(),
            Some("Cargo.lock")
        );
    }

    #[test]
    fn test_extract_target_path_with_spaces() {
        assert_eq!(
            extract_target_path("diff --git a/path with spaces/f.rs b/path with spaces/f.rs")
                .as_deref(),
            Some("path with spaces/f.rs")
        );
    }

    #[test]
    fn test_extract_target_path_quoted() {
        assert_eq!(
            extract_target_path(r#"diff --git "a/dir/my file.rs" "b/dir/my file.rs""#).as_deref(),
            Some("dir/my file.rs")
        );
    }

    #[test]
    fn test_extract_target_path_not_a_header() {
        assert_eq!(extract_target_path("--- a/src/main.rs"), None);
    }

    #[test]
    fn test_split_diff_by_file_empty() {
        assert!(split_diff_by_file("").is_empty());
    }

    #[test]
    fn test_split_diff_by_file_is_lossless() {
        let diff = format!("{}{}{}", SRC_HUNK, LOCK_HUNK, SRC_HUNK);
        let sections = split_diff_by_file(&diff);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[1].path.as_deref(), Some("package-lock.json"));

        let rejoined: String = sections.iter().map(|s| s.content).collect();
        assert_eq!(rejoined, diff);
    }

    #[test]
    fn test_split_diff_keeps_preamble() {
        let diff = format!("some preamble\n{}", SRC_HUNK);
        let sections = split_diff_by_file(&diff);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].path, None);
        assert_eq!(sections[0].content, "some preamble\n");
    }

    #[test]
    fn test_split_diff_without_trailing_newline() {
        let diff = "diff --git a/a.rs b/a.rs\n+x";
        let sections = split_diff_by_file(diff);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, diff);
    }

    #[test]
    fn test_is_lockfile() {
        assert!(is_lockfile("package-lock.json"));
        assert!(is_lockfile("frontend/yarn.lock"));
        assert!(is_lockfile("Cargo.lock"));
        assert!(is_lockfile("src/App/App.csproj.lock"));
        assert!(!is_lockfile("src/lock.rs"));
        assert!(!is_lockfile("Cargo.toml"));
    }

    #[test]
    fn test_filter_drops_only_lockfile_hunk() {
        let diff = format!("{}{}", SRC_HUNK, LOCK_HUNK);
        assert_eq!(filter_lockfile_hunks(&diff), SRC_HUNK);
    }

    #[test]
    fn test_filter_preserves_order() {
        let other = SRC_HUNK.replace("src/main.rs", "src/lib.rs");
        let diff = format!("{}{}{}", other, LOCK_HUNK, SRC_HUNK);
        assert_eq!(filter_lockfile_hunks(&diff), format!("{}{}", other, SRC_HUNK));
    }

    #[test]
    fn test_filter_all_lockfiles_yields_empty() {
        let yarn = LOCK_HUNK.replace("package-lock.json", "yarn.lock");
        let diff = format!("{}{}", LOCK_HUNK, yarn);
        assert_eq!(filter_lockfile_hunks(&diff), "");
    }

    #[test]
    fn test_filter_without_lockfiles_is_identity() {
        let diff = "diff --git a/x.rs b/x.rs\r\n+crlf line\r\n";
        assert_eq!(filter_lockfile_hunks(diff), diff);
    }
}
