use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::git::repository::GitRepository;
use crate::ui;

/// Hook marker used to identify hooks installed by aicommit-rs
pub const HOOK_MARKER: &str = "aicommit-rs hook";

/// File name git looks up in the hooks directory
pub const HOOK_FILE: &str = "prepare-commit-msg";

/// Shell script content for the prepare-commit-msg hook
///
/// git 已经提供消息来源（merge/squash/amend）时不做任何事；生成失败时保留原始草稿。
pub const HOOK_SCRIPT: &str = r#"#!/bin/sh
# aicommit-rs hook: prepare-commit-msg
# Installed by: aicommit-rs install-hook
COMMIT_MSG_FILE="$1"
COMMIT_SOURCE="$2"

case "$COMMIT_SOURCE" in
    merge|squash|commit) exit 0 ;;
esac

if ! command -v aicommit-rs >/dev/null 2>&1; then
    exit 0
fi

DRAFT=$(grep -v '^#' "$COMMIT_MSG_FILE")
if MESSAGE=$(aicommit-rs generate-message -m "$DRAFT"); then
    if [ -n "$MESSAGE" ]; then
        printf '%s\n' "$MESSAGE" > "$COMMIT_MSG_FILE"
    fi
fi
exit 0
"#;

/// Result of an installation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookInstallOutcome {
    Installed(PathBuf),
    Overwritten(PathBuf),
    /// A hook was already present and `--override` was not given.
    AlreadyExists(PathBuf),
}

/// `install-hook`: resolves the hooks directory and reports the outcome.
///
/// An existing hook without `--override` is not an error.
pub fn run(
    path: Option<&Path>,
    override_existing: bool,
    colored: bool,
) -> Result<HookInstallOutcome> {
    let dir = match path {
        Some(dir) => dir.to_path_buf(),
        None => GitRepository::open()?.hooks_dir()?,
    };

    let outcome = install_into(&dir, override_existing)?;
    match &outcome {
        HookInstallOutcome::Installed(hook) => ui::success(
            &rust_i18n::t!("hook.installed", path = hook.display().to_string()),
            colored,
        ),
        HookInstallOutcome::Overwritten(hook) => ui::success(
            &rust_i18n::t!("hook.overwritten", path = hook.display().to_string()),
            colored,
        ),
        HookInstallOutcome::AlreadyExists(hook) => ui::warning(
            &rust_i18n::t!("hook.already_exists", path = hook.display().to_string()),
            colored,
        ),
    }
    Ok(outcome)
}

/// Writes the hook script into `dir`, creating the directory if needed.
pub fn install_into(dir: &Path, override_existing: bool) -> Result<HookInstallOutcome> {
    fs::create_dir_all(dir)?;
    let hook_path = dir.join(HOOK_FILE);

    let existed = hook_path.exists();
    if existed && !override_existing {
        tracing::debug!("Keeping existing hook at {}", hook_path.display());
        return Ok(HookInstallOutcome::AlreadyExists(hook_path));
    }

    fs::write(&hook_path, HOOK_SCRIPT)?;

    // Set executable permission on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o755);
        fs::set_permissions(&hook_path, perms)?;
    }

    if existed {
        Ok(HookInstallOutcome::Overwritten(hook_path))
    } else {
        Ok(HookInstallOutcome::Installed(hook_path))
    }
}

/// Whether the hook at `path` was written by aicommit-rs.
pub fn is_own_hook(path: &Path) -> bool {
    fs::read_to_string(path).is_ok_and(|content| content.contains(HOOK_MARKER))
}
