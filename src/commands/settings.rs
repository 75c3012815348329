use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::{AppConfig, ConfigPaths, EnvTarget, write_env_var};
use crate::error::Result;
use crate::llm::provider::ModelCatalog;

/// Options of `set-settings`.
#[derive(Debug, Clone, Default)]
pub struct SettingsOptions {
    pub url: Option<String>,
    pub key: Option<String>,
    pub model: Option<String>,
    /// `User` or `Machine`.
    pub target: String,
    /// Store the key base64-encoded and mark it as such.
    pub encrypted: bool,
}

impl SettingsOptions {
    fn is_empty(&self) -> bool {
        self.url.is_none() && self.key.is_none() && self.model.is_none()
    }
}

/// Variables `set-settings` would write, in write order.
///
/// URL and key go to the family of `--model`, or of the configured model
/// when `--model` is absent. Only supplied flags produce entries.
pub fn planned_variables(
    options: &SettingsOptions,
    config: &AppConfig,
) -> Result<Vec<(&'static str, String)>> {
    let model = options.model.as_deref().unwrap_or(&config.ai.model);
    let resolved = ModelCatalog::resolve(model)?;
    let family = resolved.kind;

    let mut vars = Vec::new();
    if options.model.is_some() {
        vars.push(("AI_MODEL", resolved.id.to_string()));
    }
    if let Some(url) = &options.url {
        vars.push((family.url_var(), url.trim().to_string()));
    }
    if let Some(key) = &options.key {
        let key = key.trim();
        if options.encrypted {
            vars.push((family.key_var(), STANDARD.encode(key)));
            vars.push((family.encrypted_var(), "true".to_string()));
        } else {
            vars.push((family.key_var(), key.to_string()));
            vars.push((family.encrypted_var(), "false".to_string()));
        }
    }
    Ok(vars)
}

/// `set-settings`: persists backend settings in the target scope.
///
/// Returns the written file, or `None` when no flag was given.
pub fn run(
    options: &SettingsOptions,
    config: &AppConfig,
    paths: &ConfigPaths,
) -> Result<Option<PathBuf>> {
    let target: EnvTarget = options.target.parse()?;

    if options.is_empty() {
        eprintln!("{}", rust_i18n::t!("settings.nothing_to_update"));
        return Ok(None);
    }

    let vars = planned_variables(options, config)?;
    let path = paths.for_target(target)?.to_path_buf();
    for (name, value) in &vars {
        write_env_var(&path, name, value)?;
    }

    eprintln!(
        "{}",
        rust_i18n::t!(
            "settings.updated",
            count = vars.len(),
            target = target.to_string(),
            path = path.display().to_string()
        )
    );
    Ok(Some(path))
}
