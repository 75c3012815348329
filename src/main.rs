#[macro_use]
extern crate rust_i18n;

use aicommit_rs::*;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tokio::runtime::Runtime;

// Initialize i18n for binary crate
i18n!("locales", fallback = "en");

fn main() -> Result<()> {
    human_panic::setup_panic!();

    init_locale_early();

    // clap 在参数错误时以退出码 2 退出
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    // 日志只写 stderr，stdout 留给生成的 commit message
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // reqwest 使用 rustls-no-provider，需要显式安装 crypto provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    // 管理命令在配置损坏时也能运行
    let config = match &cli.command {
        Commands::GenerateMessage { .. } => match config::load_config() {
            Ok(config) => config,
            Err(e) => exit_with(&e, true),
        },
        _ => config::load_config().unwrap_or_else(|e| {
            tracing::debug!("Using default configuration: {}", e);
            config::AppConfig::default()
        }),
    };
    let colored = config.ui.colored;

    let rt = Runtime::new()?;

    let outcome = rt.block_on(async {
        match cli.command {
            Commands::GenerateMessage {
                message,
                branch,
                diff,
                debug,
                model,
            } => {
                let mut config = config;
                if let Some(model) = model {
                    config.ai.model = model;
                }
                let options = commands::generate::GenerateOptions {
                    message,
                    branch,
                    diff,
                    debug,
                };
                commands::generate::run(options, &config).await
            }
            Commands::InstallHook {
                path,
                override_existing,
            } => commands::hook::run(path.as_deref(), override_existing, colored).map(|_| ()),
            Commands::SetSettings {
                url,
                key,
                model,
                target,
                encrypted,
            } => {
                let options = commands::settings::SettingsOptions {
                    url,
                    key,
                    model,
                    target,
                    encrypted,
                };
                commands::settings::run(&options, &config, &config::ConfigPaths::system())
                    .map(|_| ())
            }
            Commands::SetEnv { assignment, target } => {
                commands::env::run(&assignment, &target, &config::ConfigPaths::system()).map(
                    |path| {
                        ui::success(
                            &rust_i18n::t!("env.updated", path = path.display().to_string()),
                            colored,
                        )
                    },
                )
            }
        }
    });

    if let Err(e) = outcome {
        exit_with(&e, colored);
    }
    Ok(())
}

/// 输出错误和建议后以退出码 1 结束进程
fn exit_with(e: &error::AicError, colored: bool) -> ! {
    ui::error(&e.to_string(), colored);
    if let Some(suggestion) = e.suggestion() {
        eprintln!("{}", ui::info(&suggestion, colored));
    }
    std::process::exit(1);
}

/// Initialize locale early in the startup process
///
/// Priority order:
/// 1. Environment variable AICOMMIT_UI_LANGUAGE
/// 2. Configuration file ui.language
/// 3. System locale detection
/// 4. Fallback to English
fn init_locale_early() {
    let locale = std::env::var("AICOMMIT_UI_LANGUAGE")
        .ok()
        .or_else(|| get_language_from_config().ok())
        .or_else(detect_system_locale)
        .unwrap_or_else(|| "en".to_string());

    rust_i18n::set_locale(&locale);
}

/// Reads only `ui.language` without loading or validating the full configuration.
fn get_language_from_config() -> Result<String> {
    let config_path = config::get_config_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let content = std::fs::read_to_string(&config_path)?;
    let config: toml::Value = toml::from_str(&content)?;

    config
        .get("ui")
        .and_then(|ui| ui.get("language"))
        .and_then(|lang| lang.as_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("ui.language not found in config"))
}

/// Detect system locale using sys-locale crate
///
/// Returns locale in BCP 47 format (e.g., "en", "zh-CN")
fn detect_system_locale() -> Option<String> {
    sys_locale::get_locale().map(|locale| locale.replace('_', "-"))
}
