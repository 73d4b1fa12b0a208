use std::{env, path::PathBuf};

use super::schema::Settings;

/// Largest accepted lyric timing step, one minute.
const MAX_OFFSET_STEP_MS: u64 = 60_000;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `CANTABILE__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("CANTABILE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_OFFSET_STEP_MS).contains(&self.lyrics.offset_step_ms.unsigned_abs()) {
            return Err(format!(
                "lyrics.offset_step_ms must be within 1..={MAX_OFFSET_STEP_MS} (either sign)"
            ));
        }
        if self.ui.notice_seconds == 0 {
            return Err("ui.notice_seconds must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `CANTABILE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CANTABILE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `$XDG_CONFIG_HOME/cantabile/config.toml`, or `~/.config/cantabile/config.toml`
/// when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("cantabile").join("config.toml"))
}

/// `$XDG_STATE_HOME/cantabile/cantabile.log`, or `~/.local/state/cantabile/cantabile.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("cantabile").join("cantabile.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
