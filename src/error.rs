use thiserror::Error;

pub type Result<T> = std::result::Result<T, AicError>;

#[derive(Error, Debug)]
pub enum AicError {
    /// 过滤 lockfile 之后的 diff 仍然超过大小上限
    #[error(
        "The staged changes are too large to process ({size} bytes, limit {max}). Please reduce the number of files or size of changes and try again."
    )]
    DiffTooLarge { size: usize, max: usize },

    #[error("Unable to generate commit message: Both branch and diff are empty.")]
    InsufficientInput,

    #[error("Unsupported model: '{0}'")]
    UnsupportedModel(String),

    /// 网络层的瞬时错误（超时、连接失败、限流、5xx），不会自动重试
    #[error("AI backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Invalid variable format '{0}'. Please use the format: VAR_NAME=value")]
    InvalidEnvironmentFormat(String),

    #[error("Invalid target '{0}'. Please use 'User' or 'Machine'.")]
    InvalidTarget(String),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Git command failed: {0}")]
    GitCommand(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("AI backend error: {0}")]
    Llm(String),

    /// 后端返回了非 2xx 且不属于瞬时错误的状态码
    #[error("AI backend API error ({status}): {message}")]
    LlmApi { status: u16, message: String },

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration parsing error: {0}")]
    ConfigParse(#[from] config::ConfigError),

    #[error("Failed to write settings: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Failed to read settings: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl AicError {
    /// 获取错误的解决建议
    pub fn suggestion(&self) -> Option<String> {
        let hint = match self {
            AicError::DiffTooLarge { .. } => rust_i18n::t!("suggestion.diff_too_large"),
            AicError::InsufficientInput => rust_i18n::t!("suggestion.insufficient_input"),
            AicError::UnsupportedModel(_) => rust_i18n::t!("suggestion.unsupported_model"),
            AicError::BackendUnavailable(_) => rust_i18n::t!("suggestion.backend_unavailable"),
            AicError::InvalidEnvironmentFormat(_) => rust_i18n::t!("suggestion.env_format"),
            AicError::Config(msg) if msg.contains("OPENAI_API_KEY") => {
                rust_i18n::t!("suggestion.openai_key")
            }
            AicError::Config(msg) if msg.contains("LLAMA_API_KEY") => {
                rust_i18n::t!("suggestion.llama_key")
            }
            AicError::LlmApi { status: 401, .. } | AicError::LlmApi { status: 403, .. } => {
                rust_i18n::t!("suggestion.unauthorized")
            }
            AicError::Llm(msg) if msg.contains("Failed to parse") => {
                rust_i18n::t!("suggestion.parse_failed")
            }
            _ => return None,
        };
        Some(hint.to_string())
    }

    /// 是否属于后端调用失败（可在 ignore_api_errors 模式下降级处理）
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            AicError::BackendUnavailable(_) | AicError::LlmApi { .. } | AicError::Llm(_)
        )
    }
}
