//! Config file discovery and loading for `.logpipe.toml`.
//!
//! Checks two locations in precedence order:
//! 1. `./.logpipe.toml` (project-local)
//! 2. `~/.config/logpipe.toml` (user-global)

use std::path::PathBuf;

use super::RenderConfig;

const CONFIG_FILENAME: &str = ".logpipe.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_CONFIG_FILENAME: &str = "logpipe.toml";

/// Load config from the first discovered location, or return defaults.
pub fn load_render_config() -> RenderConfig {
    if let Some(path) = find_config_file() {
        match RenderConfig::load(&path) {
            Ok(config) => {
                tracing::debug!(?path, "Loaded render config");
                return config;
            }
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to load render config, using defaults");
            }
        }
    }
    RenderConfig::default()
}

fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    if let Some(home) = home_dir() {
        let global = home.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILENAME);
        if global.is_file() {
            return Some(global);
        }
    }

    None
}

/// Expand a configured path, resolving `~` to the home directory.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
