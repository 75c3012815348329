//! set-settings / set-env 与配置加载的集成测试
//!
//! 写入的 [env] 表需要在下一次加载配置时生效，进程环境变量优先。

use aicommit_rs::commands::{env, settings};
use aicommit_rs::config::{AppConfig, ConfigPaths, load_config_from};
use aicommit_rs::error::AicError;
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::env as std_env;
use tempfile::TempDir;

/// RAII 环境变量 guard
struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let original = std_env::var(key).ok();
        // SAFETY: serial_test 保证串行执行
        unsafe { std_env::set_var(key, value) };
        Self { key, original }
    }

    fn remove(key: &'static str) -> Self {
        let original = std_env::var(key).ok();
        // SAFETY: 同上
        unsafe { std_env::remove_var(key) };
        Self { key, original }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: 同上
        match &self.original {
            Some(v) => unsafe { std_env::set_var(self.key, v) },
            None => unsafe { std_env::remove_var(self.key) },
        }
    }
}

const WELL_KNOWN: &[&str] = &[
    "AI_MODEL",
    "OPENAI_API_KEY",
    "OPENAI_API_URL",
    "OPENAI_KEY_ENCRYPTED",
    "OPENAI_IS_ENCRYPTED",
    "LLAMA_API_KEY",
    "LLAMA_API_URL",
    "LLAMA_KEY_ENCRYPTED",
    "LLAMA_IS_ENCRYPTED",
    "DOTNET_AICOMMITMESSAGE_DISABLE_API",
    "DOTNET_AICOMMITMESSAGE_IGNORE_API_ERRORS",
    "DOTNET_AICOMMITMESSAGE_USE_EMOJI",
    "COMMIT_CACHE_PATH",
];

fn clean_env() -> Vec<EnvGuard> {
    WELL_KNOWN.iter().map(|key| EnvGuard::remove(key)).collect()
}

fn paths(dir: &TempDir) -> ConfigPaths {
    ConfigPaths {
        user: Some(dir.path().join("user").join("config.toml")),
        machine: Some(dir.path().join("machine").join("config.toml")),
    }
}

fn settings_options(target: &str) -> settings::SettingsOptions {
    settings::SettingsOptions {
        target: target.to_string(),
        ..Default::default()
    }
}

#[test]
#[serial]
fn test_set_env_feeds_next_load() {
    let _env = clean_env();
    let dir = TempDir::new().unwrap();
    let paths = paths(&dir);

    env::run("DOTNET_AICOMMITMESSAGE_USE_EMOJI=true", "User", &paths).unwrap();
    env::run("AI_MODEL = gpt-4.1", "user", &paths).unwrap();

    let config = load_config_from(&paths).unwrap();
    assert!(config.ai.use_emoji);
    assert_eq!(config.ai.model, "gpt-4.1");
}

#[test]
#[serial]
fn test_machine_scope_is_fallback_for_user_scope() {
    let _env = clean_env();
    let dir = TempDir::new().unwrap();
    let paths = paths(&dir);

    env::run("AI_MODEL=gpt-4o", "Machine", &paths).unwrap();
    env::run("COMMIT_CACHE_PATH=/var/cache/aic", "Machine", &paths).unwrap();
    env::run("AI_MODEL=gpt-5", "User", &paths).unwrap();

    let config = load_config_from(&paths).unwrap();
    assert_eq!(config.ai.model, "gpt-5");
    assert_eq!(
        config.cache.path.as_deref(),
        Some(std::path::Path::new("/var/cache/aic"))
    );
}

#[test]
#[serial]
fn test_process_env_beats_persisted_value() {
    let _env = clean_env();
    let dir = TempDir::new().unwrap();
    let paths = paths(&dir);

    env::run("AI_MODEL=gpt-4o", "User", &paths).unwrap();
    let _model = EnvGuard::set("AI_MODEL", "o4-mini");

    let config = load_config_from(&paths).unwrap();
    assert_eq!(config.ai.model, "o4-mini");
}

#[test]
#[serial]
fn test_encrypted_settings_round_trip() {
    let _env = clean_env();
    let dir = TempDir::new().unwrap();
    let paths = paths(&dir);

    let options = settings::SettingsOptions {
        model: Some("llama-3.3-70b-instruct".to_string()),
        url: Some("https://llama.example.com".to_string()),
        key: Some("llama-secret".to_string()),
        encrypted: true,
        ..settings_options("User")
    };
    settings::run(&options, &AppConfig::default(), &paths).unwrap();

    let config = load_config_from(&paths).unwrap();
    assert_eq!(config.ai.model, "llama-3.3-70b-instruct");
    assert_eq!(
        config.providers.llama.endpoint.as_deref(),
        Some("https://llama.example.com")
    );
    assert!(config.providers.llama.key_encrypted);
    assert_eq!(
        config.providers.llama.plain_api_key().unwrap().as_deref(),
        Some("llama-secret")
    );
    // OpenAI 设置不受影响
    assert_eq!(config.providers.openai.api_key, None);
}

#[test]
#[serial]
fn test_key_without_model_uses_configured_family() {
    let _env = clean_env();
    let dir = TempDir::new().unwrap();
    let paths = paths(&dir);

    let options = settings::SettingsOptions {
        key: Some("sk-plain".to_string()),
        ..settings_options("User")
    };
    settings::run(&options, &load_config_from(&paths).unwrap(), &paths).unwrap();

    let config = load_config_from(&paths).unwrap();
    assert_eq!(
        config.providers.openai.plain_api_key().unwrap().as_deref(),
        Some("sk-plain")
    );
    assert!(!config.providers.openai.key_encrypted);
}

#[test]
fn test_invalid_assignment_and_target() {
    let dir = TempDir::new().unwrap();
    let paths = paths(&dir);

    assert!(matches!(
        env::run("NO_EQUALS_SIGN", "User", &paths),
        Err(AicError::InvalidEnvironmentFormat(_))
    ));
    assert!(matches!(
        env::run("A=b", "Everyone", &paths),
        Err(AicError::InvalidTarget(t)) if t == "Everyone"
    ));
    assert!(matches!(
        settings::run(
            &settings::SettingsOptions {
                model: Some("gpt-4o".to_string()),
                ..settings_options("Process")
            },
            &AppConfig::default(),
            &paths
        ),
        Err(AicError::InvalidTarget(_))
    ));
    assert!(!dir.path().join("user").exists());
}
