//! # aicommit-rs
//!
//! Git commit message 生成工具：根据分支名、草稿消息和 staged diff 生成一行
//! `type - description` 形式的 commit message，并自动加上 issue/ticket 前缀。
//!
//! ## 功能
//! - **消息生成**：OpenAI 兼容接口和 Azure AI inference 两类后端
//! - **跳过指令**：草稿中包含 `-skipai` 时不调用后端
//! - **前缀规则**：GitHub 仓库使用 `#123`，其他仓库使用 `[PROJ-123]`
//! - **响应缓存**：相同输入直接返回缓存结果
//! - **Git hook**：`prepare-commit-msg` 自动调用
//!
//! ## 快速开始
//! ```bash
//! aicommit-rs set-settings --model gpt-4o-mini --key sk-...
//! aicommit-rs install-hook
//! git add .
//! aicommit-rs generate-message -m "wip"
//! ```
//!
//! ## 作为库使用
//! ```no_run
//! use aicommit_rs::config::AppConfig;
//! use aicommit_rs::git::repository::GitRepository;
//! use aicommit_rs::message::{CommitMessagePipeline, GenerationRequest};
//!
//! # async fn example() -> aicommit_rs::error::Result<()> {
//! let repo = GitRepository::open()?;
//! let config = AppConfig::default();
//! let request = GenerationRequest {
//!     message: "Initial commit".to_string(),
//!     ..Default::default()
//! };
//! let message = CommitMessagePipeline::new(&repo, &config).run(&request).await?;
//! println!("{}", message);
//! # Ok(())
//! # }
//! ```
//!
//! ## 核心模块
//! - [`message`] - 生成流水线、指令解析、后处理
//! - [`llm`] - 后端接口、模型目录、prompt
//! - [`cache`] - 响应缓存
//! - [`git`] - Git 操作抽象和 diff 过滤
//! - [`config`] - 分层配置
//! - [`commands`] - CLI 命令实现
//! - [`error`] - 统一错误类型

#[macro_use]
extern crate rust_i18n;

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod git;
pub mod llm;
pub mod message;
pub mod ui;

// Initialize i18n for library modules
i18n!("locales", fallback = "en");
