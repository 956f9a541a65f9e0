//! Configuration loading.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use itr_core::TrackerConfig;

/// Loads tracker configuration, optionally from a specific file.
///
/// Later sources win: defaults, `<config_dir>/itr/config.toml`, the given
/// file, then `ITR_*` environment variables.
#[expect(
    clippy::result_large_err,
    reason = "figment::Error is large but only returned at startup"
)]
pub fn load_from(config_path: Option<&Path>) -> Result<TrackerConfig, figment::Error> {
    let mut figment = Figment::from(Serialized::defaults(TrackerConfig::default()));

    if let Some(config_dir) = dirs_config_path() {
        figment = figment.merge(Toml::file(config_dir.join("config.toml")));
    }

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("ITR_"));

    figment.extract()
}

/// Returns the platform-specific config directory for itr.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("itr"))
}
