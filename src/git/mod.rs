pub mod diff;
pub mod repository;

use crate::error::Result;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Git 查询的窄接口
///
/// 流水线只需要三个查询：当前分支、暂存区 diff、origin 远程地址。
/// 主要实现：[`GitRepository`](repository::GitRepository)
///
/// # 设计理念
/// - 流水线不拼接任何 git 命令，测试时无需真实仓库
/// - 支持 mock 测试（通过 `mockall`）
///
/// # 示例
/// ```no_run
/// use aicommit_rs::git::{GitOperations, repository::GitRepository};
///
/// # fn main() -> anyhow::Result<()> {
/// let repo = GitRepository::open()?;
/// println!("branch: {:?}", repo.current_branch()?);
/// println!("staged:\n{}", repo.staged_diff()?);
/// # Ok(())
/// # }
/// ```
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait GitOperations {
    /// 当前分支名（不含 `refs/heads/`）
    ///
    /// 尚无提交的分支也会返回名称；detached HEAD 返回 `None`。
    fn current_branch(&self) -> Result<Option<String>>;

    /// 暂存区 diff，等价于 `git diff --cached`
    ///
    /// 没有暂存内容时返回空字符串。
    fn staged_diff(&self) -> Result<String>;

    /// `remote.origin.url`，未配置时返回 `None`
    fn remote_origin_url(&self) -> Result<Option<String>>;
}

/// 当前目录不在 git 仓库中时使用
///
/// 分支和 diff 查询返回打开仓库时的错误，远程地址视为未配置；
/// 调用方已提供分支和 diff 时流水线仍可运行。
#[derive(Debug, Clone)]
pub struct NoRepository {
    reason: String,
}

impl NoRepository {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl GitOperations for NoRepository {
    fn current_branch(&self) -> Result<Option<String>> {
        Err(crate::error::AicError::GitCommand(self.reason.clone()))
    }

    fn staged_diff(&self) -> Result<String> {
        Err(crate::error::AicError::GitCommand(self.reason.clone()))
    }

    fn remote_origin_url(&self) -> Result<Option<String>> {
        Ok(None)
    }
}
