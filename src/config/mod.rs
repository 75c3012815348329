//! Layered configuration.
//!
//! [`load_config`] merges defaults, the user config file, persisted `[env]`
//! tables and the process environment into one [`AppConfig`] that is passed
//! explicitly to the commands.

mod env_store;
mod loader;
mod structs;


pub use env_store::{
    ConfigPaths, EnvTarget, machine_config_path, read_env_table, write_env_var,
};
pub use loader::{get_config_path, load_config, load_config_from};
pub use structs::*;
