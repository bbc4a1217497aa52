use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{File, FileFormat};
use folio_models::{
    contact::{ValidationMode, ViolationReport},
    Sha256Hash,
};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable holding a list of config files (separated like
/// `PATH`). Later files override earlier ones.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG";

pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var_os(CONFIG_PATH_ENV) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };
    load_with_override(&paths, &[])
}

/// Loads the config files at `paths` and then applies each TOML snippet in
/// `overrides` on top.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            anyhow::Ok(builder.add_source(File::from_str(&content, FileFormat::Toml)))
        })?;

    overrides
        .iter()
        .fold(builder, |builder, snippet| {
            builder.add_source(File::from_str(snippet, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub contact: ContactConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    #[serde(default)]
    pub validation: ValidationMode,
    #[serde(default)]
    pub report: ViolationReport,
}

#[derive(Debug, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password_sha256: Sha256Hash,
}
