// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-based loader.
//!
//! Merge order (later overrides earlier): compiled defaults,
//! `/etc/ryze/ryze.toml`, `~/.config/ryze/ryze.toml`, `./ryze.toml`,
//! then `RYZE_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::RyzeConfig;

/// Config files consulted by [`load_config`], lowest precedence first.
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/ryze/ryze.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("ryze").join("ryze.toml"));
    }
    paths.push(PathBuf::from("ryze.toml"));
    paths
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<RyzeConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<RyzeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RyzeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RyzeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RyzeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(RyzeConfig::default()));
    for path in config_file_candidates() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider())
}

/// `RYZE_*` variables mapped onto sections with an explicit prefix table.
///
/// `Env::split("_")` would turn `RYZE_GEMINI_API_KEY` into `gemini.api.key`,
/// so the first segment is mapped by hand instead.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("RYZE_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("app_", "app.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("generation_", "generation.", 1)
            .replacen("cooldown_", "cooldown.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("user_", "user.", 1);
        mapped.into()
    })
}
