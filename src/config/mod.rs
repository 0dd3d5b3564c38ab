//! Configuration module
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use crate::error::Result;
use std::path::PathBuf;
use tracing::info;

/// Load settings from the first settings file found, or defaults.
///
/// `SAUCENAO_SETTINGS_PATH` is checked first, then `saucenao.yml`,
/// `config/saucenao.yml` and the user config directory. Environment
/// overrides are applied in every case.
pub fn load_settings() -> Result<Settings> {
    if let Ok(path) = std::env::var("SAUCENAO_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return load_from(path);
        }
    }

    for path in default_paths() {
        if path.exists() {
            return load_from(path);
        }
    }

    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}

/// Load settings from an explicit path, applying environment overrides
pub fn load_from(path: PathBuf) -> Result<Settings> {
    info!("Loading settings from: {}", path.display());
    let mut settings = Settings::from_file(&path)?;
    settings.merge_env();
    Ok(settings)
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("saucenao.yml"),
        PathBuf::from("config/saucenao.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("saucenao-rs/saucenao.yml"));
    }
    paths
}
