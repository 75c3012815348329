// 持久化的环境变量
//
// set-env / set-settings 写入配置文件的 `[env]` 表，加载配置时作为
// 进程环境变量之后的回退来源。

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use toml::{Table, Value};

use crate::error::{AicError, Result};

const ENV_TABLE: &str = "env";

/// Scope a persisted variable is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvTarget {
    /// Per-user config file.
    User,
    /// Machine-wide config file, usually requires elevated permissions.
    Machine,
}

impl FromStr for EnvTarget {
    type Err = AicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(EnvTarget::User),
            "machine" => Ok(EnvTarget::Machine),
            _ => Err(AicError::InvalidTarget(s.to_string())),
        }
    }
}

impl std::fmt::Display for EnvTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvTarget::User => write!(f, "User"),
            EnvTarget::Machine => write!(f, "Machine"),
        }
    }
}

/// Locations of the persisted configuration files.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub user: Option<PathBuf>,
    pub machine: Option<PathBuf>,
}

impl ConfigPaths {
    /// Platform default locations.
    pub fn system() -> Self {
        Self {
            user: super::loader::get_config_path(),
            machine: machine_config_path(),
        }
    }

    /// File backing the given scope.
    pub fn for_target(&self, target: EnvTarget) -> Result<&Path> {
        let path = match target {
            EnvTarget::User => self.user.as_deref(),
            EnvTarget::Machine => self.machine.as_deref(),
        };
        path.ok_or_else(|| {
            AicError::Config(
                rust_i18n::t!("config.no_path_for_target", target = target.to_string())
                    .to_string(),
            )
        })
    }
}

/// Machine-wide config file.
///
/// `/etc/aicommit/config.toml` on Unix, `%ProgramData%\aicommit\config.toml` on Windows.
pub fn machine_config_path() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var_os("ProgramData")
            .map(|dir| PathBuf::from(dir).join("aicommit").join("config.toml"))
    }
    #[cfg(not(windows))]
    {
        Some(PathBuf::from("/etc/aicommit/config.toml"))
    }
}

/// Reads the `[env]` table of a config file.
///
/// A missing file yields an empty map. Non-string values are ignored.
pub fn read_env_table(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(path)?;
    let table: Table = content.parse()?;

    let vars = table
        .get(ENV_TABLE)
        .and_then(Value::as_table)
        .map(|env| {
            env.iter()
                .filter_map(|(name, value)| {
                    value.as_str().map(|v| (name.clone(), v.to_string()))
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(vars)
}

/// Sets `name = value` in the `[env]` table of a config file.
///
/// Other tables in the file are preserved; parent directories are created.
pub fn write_env_var(path: &Path, name: &str, value: &str) -> Result<()> {
    let mut table: Table = if path.exists() {
        fs::read_to_string(path)?.parse()?
    } else {
        Table::new()
    };

    let env = table
        .entry(ENV_TABLE)
        .or_insert_with(|| Value::Table(Table::new()));
    let Some(env) = env.as_table_mut() else {
        return Err(AicError::Config(format!(
            "'{}' in {} is not a table",
            ENV_TABLE,
            path.display()
        )));
    };
    env.insert(name.to_string(), Value::String(value.to_string()));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string(&table)?)?;

    tracing::debug!("Persisted {} to {}", name, path.display());
    Ok(())
}
