//! Configuration loading
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: `<config dir>/stateout/config.toml`
//! 3. Project config: `.stateout/config.toml`
//! 4. Environment variables: `NO_COLOR`, `STATEOUT_*`
//! 5. CLI flags (applied by the binary)
//!
//! # Example Config
//!
//! ```toml
//! color = "never"
//! compact_warnings = true
//! columns = 100
//! state = "envs/prod.tfstate"
//! ```

mod load;
mod merge;
mod types;

#[cfg(test)]
mod tests_loading;

pub use load::{
    global_config_path, load_config, load_config_with, load_toml_file, project_config_path,
    ENV_COLOR, ENV_COLUMNS, ENV_COMPACT_WARNINGS, ENV_NO_COLOR, ENV_STATE,
};
pub use types::{ColorChoice, Config, ConfigFile};
