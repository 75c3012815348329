//! Command implementations.
//!
//! One module per CLI verb:
//! - `generate` - `generate-message`, runs the commit message pipeline.
//! - `hook` - `install-hook`, writes the `prepare-commit-msg` script.
//! - `settings` - `set-settings`, persists backend URL/key/model.
//! - `env` - `set-env`, persists one `VAR=value`.
//!
//! # Architecture
//! ```text
//! CLI (cli.rs)
//!   ├── commands/generate.rs ─> message::CommitMessagePipeline
//!   ├── commands/hook.rs
//!   ├── commands/settings.rs ─> config::write_env_var
//!   └── commands/env.rs      ─> config::write_env_var
//! ```

/// Variable persistence (`set-env`).
pub mod env;
/// Commit message generation (`generate-message`).
pub mod generate;
/// Hook installation (`install-hook`).
pub mod hook;
/// Backend settings persistence (`set-settings`).
pub mod settings;
