//! 全局常量定义

/// Commit message 处理相关常量
pub mod commit {
    /// 过滤后 diff 的最大字节数（100 KiB，包含边界值）
    pub const MAX_DIFF_SIZE: usize = 100 * 1024;

    /// 跳过 AI 生成的尾部指令
    pub const SKIP_DIRECTIVE: &str = "-skipai";

    /// API 被禁用且草稿为空时使用的兜底消息
    pub const FALLBACK_MESSAGE: &str = "chore - update";

    /// 正则匹配前截断的输入长度上限（字节）
    pub const MATCH_INPUT_LIMIT: usize = 4096;

    /// 会被整段丢弃的 lockfile 文件名
    pub const LOCKFILES: &[&str] = &[
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        ".csproj.lock",
        "composer.lock",
        "Gemfile.lock",
        "Pipfile.lock",
        "Cargo.lock",
        "poetry.lock",
    ];
}

/// 缓存相关常量
pub mod cache {
    /// 缓存条目的默认有效期（天）
    pub const DEFAULT_MAX_AGE_DAYS: i64 = 30;

    /// 缓存根目录下的子目录名
    pub const CACHE_SUBDIR: &str = "commit-cache";
}

/// AI 后端相关常量
pub mod llm {
    /// 默认模型
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

    /// Azure AI inference 的 api-version 查询参数
    pub const AZURE_API_VERSION: &str = "2024-05-01-preview";
}

/// `--debug` 时写出原始响应的文件名
pub const DEBUG_FILE: &str = "debug.json";

/// 配置目录 / 缓存目录使用的应用名
pub const APP_NAME: &str = "aicommit";
