//! Configuration loading with env substitution.
//!
//! Config files: `juliet.toml`, `juliet.yaml`, `juliet.yml` or `juliet.json`.
//! Searched in `./` then the user config directory (`~/.config/juliet/` on Linux).
//!
//! `${ENV_VAR}` placeholders are substituted before parsing.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;

pub use {
    error::{Error, Result},
    loader::{config_dir, discover_and_load, find_config_file, load_config},
    schema::{DiagramRenderConfig, JulietConfig, MathRenderConfig, RenderConfig, ServerConfig},
};
