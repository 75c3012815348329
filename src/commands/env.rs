use std::path::PathBuf;

use crate::config::{ConfigPaths, EnvTarget, write_env_var};
use crate::error::{AicError, Result};

/// Splits `VAR=value` on the first `=`; both sides are trimmed.
///
/// # Errors
/// [`AicError::InvalidEnvironmentFormat`] when `=` is missing or the name is empty.
pub fn parse_assignment(input: &str) -> Result<(String, String)> {
    let (name, value) = input
        .split_once('=')
        .ok_or_else(|| AicError::InvalidEnvironmentFormat(input.to_string()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(AicError::InvalidEnvironmentFormat(input.to_string()));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// `set-env`: persists one variable in the `[env]` table of the target scope.
///
/// Returns the file that was written.
pub fn run(assignment: &str, target: &str, paths: &ConfigPaths) -> Result<PathBuf> {
    let (name, value) = parse_assignment(assignment)?;
    let target: EnvTarget = target.parse()?;
    let path = paths.for_target(target)?.to_path_buf();

    write_env_var(&path, &name, &value)?;
    tracing::debug!("set-env {} ({}) -> {}", name, target, path.display());
    Ok(path)
}
