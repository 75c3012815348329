// 配置加载逻辑
//
// 此文件负责从配置文件、持久化的 [env] 表和进程环境变量加载配置。

use std::collections::BTreeMap;
use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use toml::{Table, Value};

use super::env_store::{ConfigPaths, read_env_table};
use super::structs::AppConfig;
use crate::constants::APP_NAME;
use crate::error::{AicError, Result};

/// 一个约定俗成的环境变量及其对应的配置键
struct WellKnownVar {
    names: &'static [&'static str],
    key: &'static str,
    flag: bool,
}

const WELL_KNOWN_VARS: &[WellKnownVar] = &[
    WellKnownVar {
        names: &["AI_MODEL"],
        key: "ai.model",
        flag: false,
    },
    WellKnownVar {
        names: &["OPENAI_API_KEY"],
        key: "providers.openai.api_key",
        flag: false,
    },
    WellKnownVar {
        names: &["OPENAI_API_URL"],
        key: "providers.openai.endpoint",
        flag: false,
    },
    WellKnownVar {
        names: &["OPENAI_KEY_ENCRYPTED", "OPENAI_IS_ENCRYPTED"],
        key: "providers.openai.key_encrypted",
        flag: true,
    },
    WellKnownVar {
        names: &["LLAMA_API_KEY"],
        key: "providers.llama.api_key",
        flag: false,
    },
    WellKnownVar {
        names: &["LLAMA_API_URL"],
        key: "providers.llama.endpoint",
        flag: false,
    },
    WellKnownVar {
        names: &["LLAMA_KEY_ENCRYPTED", "LLAMA_IS_ENCRYPTED"],
        key: "providers.llama.key_encrypted",
        flag: true,
    },
    WellKnownVar {
        names: &["DOTNET_AICOMMITMESSAGE_DISABLE_API"],
        key: "ai.disable_api",
        flag: true,
    },
    WellKnownVar {
        names: &["DOTNET_AICOMMITMESSAGE_IGNORE_API_ERRORS"],
        key: "ai.ignore_api_errors",
        flag: true,
    },
    WellKnownVar {
        names: &["DOTNET_AICOMMITMESSAGE_USE_EMOJI"],
        key: "ai.use_emoji",
        flag: true,
    },
    WellKnownVar {
        names: &["COMMIT_CACHE_PATH"],
        key: "cache.path",
        flag: false,
    },
];

#[derive(Debug, Clone, PartialEq)]
enum Setting {
    Text(String),
    Flag(bool),
}

/// 加载应用配置
///
/// 配置加载优先级（从高到低）：
/// 1. 进程环境变量中的约定变量（`AI_MODEL`、`OPENAI_API_KEY` 等）
/// 2. `AICOMMIT__*` 环境变量（双下划线表示嵌套）
///    - 例如：`AICOMMIT__AI__MODEL=gpt-4o`
///    - 例如：`AICOMMIT__CACHE__MAX_AGE_DAYS=7`
/// 3. 持久化的 `[env]` 表（用户级优先于机器级）
/// 4. 配置文件（~/.config/aicommit/config.toml）
/// 5. 默认值（来自 structs 的 Default trait 和 serde(default) 属性）
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&ConfigPaths::system())
}

/// 从指定位置加载配置（便于测试）
pub fn load_config_from(paths: &ConfigPaths) -> Result<AppConfig> {
    let mut builder = Config::builder();

    // 1. 加载配置文件（如果存在）
    if let Some(config_path) = &paths.user
        && config_path.exists()
    {
        builder = builder.add_source(File::from(config_path.clone()));
    }

    // 2. 持久化的 [env] 表，转换为结构化配置后作为一个 TOML source
    let persisted = persisted_env(paths)?;
    let persisted_settings = collect_settings(|name| persisted.get(name).cloned())?;
    if !persisted_settings.is_empty() {
        let source = toml::to_string(&settings_to_table(&persisted_settings))?;
        builder = builder.add_source(File::from_str(&source, FileFormat::Toml));
    }

    // 3. AICOMMIT__* 环境变量
    builder = builder.add_source(
        Environment::with_prefix("AICOMMIT")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 进程环境变量中的约定变量（优先级最高）
    for (key, setting) in collect_settings(|name| std::env::var(name).ok())? {
        builder = match setting {
            Setting::Text(value) => builder.set_override(key, value)?,
            Setting::Flag(value) => builder.set_override(key, value)?,
        };
    }

    let config = builder.build()?;
    let app_config: AppConfig = config.try_deserialize()?;
    app_config.validate()?;

    tracing::debug!("Loaded configuration: {:?}", app_config);

    Ok(app_config)
}

/// 合并用户级和机器级的 `[env]` 表，用户级优先
fn persisted_env(paths: &ConfigPaths) -> Result<BTreeMap<String, String>> {
    let mut merged = match &paths.machine {
        Some(path) => read_env_table(path).unwrap_or_else(|e| {
            tracing::debug!("Ignoring machine config {}: {}", path.display(), e);
            BTreeMap::new()
        }),
        None => BTreeMap::new(),
    };
    if let Some(path) = &paths.user {
        merged.extend(read_env_table(path)?);
    }
    Ok(merged)
}

fn collect_settings(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Vec<(&'static str, Setting)>> {
    let mut settings = Vec::new();

    for var in WELL_KNOWN_VARS {
        let found = var.names.iter().find_map(|name| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (*name, value))
        });
        let Some((name, value)) = found else {
            continue;
        };

        let setting = if var.flag {
            Setting::Flag(parse_flag(name, &value)?)
        } else {
            Setting::Text(value.trim().to_string())
        };
        settings.push((var.key, setting));
    }

    Ok(settings)
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AicError::Config(format!(
            "Invalid boolean value '{}' for {}",
            value, name
        ))),
    }
}

fn settings_to_table(settings: &[(&'static str, Setting)]) -> Table {
    let mut root = Table::new();
    for (key, setting) in settings {
        let value = match setting {
            Setting::Text(s) => Value::String(s.clone()),
            Setting::Flag(b) => Value::Boolean(*b),
        };
        insert_dotted(&mut root, key, value);
    }
    root
}

/// 按 `a.b.c` 形式的键写入嵌套表
fn insert_dotted(table: &mut Table, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            table.insert(key.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = table
                .entry(head)
                .or_insert_with(|| Value::Table(Table::new()));
            if let Some(inner) = entry.as_table_mut() {
                insert_dotted(inner, rest, value);
            }
        }
    }
}

/// 获取配置文件路径
///
/// 返回 ~/.config/aicommit/config.toml
pub fn get_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
}
