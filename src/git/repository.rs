use std::io::Write;
use std::path::{Path, PathBuf};

use git2::{DiffOptions, ErrorCode, Repository};

use crate::error::{AicError, Result};
use crate::git::GitOperations;

pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// 打开当前目录所在的 git 仓库
    pub fn open() -> Result<Self> {
        Self::discover(".")
    }

    /// 从指定路径向上查找 git 仓库
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Repository::discover(path.as_ref()).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                AicError::GitCommand(rust_i18n::t!("git.not_a_repository").to_string())
            } else {
                AicError::Git(e)
            }
        })?;
        Ok(Self { repo })
    }

    /// hook 脚本所在目录
    ///
    /// 优先使用 `core.hooksPath`（相对路径按工作区根目录解析），
    /// 否则为 `<git-dir>/hooks`。
    pub fn hooks_dir(&self) -> Result<PathBuf> {
        let config = self.repo.config()?;
        match config.get_string("core.hooksPath") {
            Ok(custom) if !custom.trim().is_empty() => {
                let custom = PathBuf::from(custom.trim());
                if custom.is_absolute() {
                    return Ok(custom);
                }
                let base = self
                    .repo
                    .workdir()
                    .unwrap_or_else(|| self.repo.path());
                Ok(base.join(custom))
            }
            Ok(_) => Ok(self.repo.path().join("hooks")),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(self.repo.path().join("hooks")),
            Err(e) => Err(e.into()),
        }
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.repo.is_empty()?)
    }

    /// 将 git2::Diff 转换为字符串
    fn diff_to_string(&self, diff: &git2::Diff) -> Result<String> {
        let mut output = Vec::new();
        diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
            // 如果 origin 是可打印字符（+、-、空格），先写入它
            let origin = line.origin();
            if matches!(origin, '+' | '-' | ' ') {
                let _ = output.write_all(&[origin as u8]);
            }
            let _ = output.write_all(line.content());
            true
        })?;
        Ok(String::from_utf8_lossy(&output).to_string())
    }
}

impl GitOperations for GitRepository {
    fn current_branch(&self) -> Result<Option<String>> {
        // Unborn branch：HEAD 仍是指向 refs/heads/<name> 的符号引用
        if self.is_empty()? {
            let head = self.repo.find_reference("HEAD")?;
            return Ok(head
                .symbolic_target()
                .and_then(|target| target.strip_prefix("refs/heads/"))
                .map(|name| name.to_string()));
        }

        let head = self.repo.head()?;
        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            // HEAD 处于 detached 状态
            Ok(None)
        }
    }

    fn staged_diff(&self) -> Result<String> {
        let index = self.repo.index()?;
        let mut opts = DiffOptions::new();

        // 空仓库时，对比 empty tree (None) 和 index
        let head_tree = if self.is_empty()? {
            None
        } else {
            Some(self.repo.head()?.peel_to_tree()?)
        };

        let diff =
            self.repo
                .diff_tree_to_index(head_tree.as_ref(), Some(&index), Some(&mut opts))?;
        self.diff_to_string(&diff)
    }

    fn remote_origin_url(&self) -> Result<Option<String>> {
        match self.repo.find_remote("origin") {
            Ok(remote) => Ok(remote.url().map(|url| url.to_string())),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
