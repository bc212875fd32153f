use std::{env, path::PathBuf, time::Duration};

use tracing_subscriber::EnvFilter;

use crate::player::DEFAULT_RESTART_THRESHOLD;

use super::schema::{PlayerSettings, Settings};

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then layers environment
/// variables (prefix `PLAYDECK__`) over it; struct defaults fill the rest.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("PLAYDECK")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Load and validate, falling back to defaults on any problem.
    ///
    /// The second value describes why defaults were used. It is returned
    /// rather than logged since the subscriber depends on these settings.
    pub fn load_or_default() -> (Self, Option<String>) {
        match Self::load() {
            Ok(s) => match s.validate() {
                Ok(()) => (s, None),
                Err(msg) => (Self::default(), Some(format!("invalid config: {msg}"))),
            },
            Err(e) => (Self::default(), Some(format!("failed to load config: {e}"))),
        }
    }

    /// Reject values the player cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        let t = self.player.restart_threshold_secs;
        if Duration::try_from_secs_f64(t).is_err() {
            return Err(format!(
                "player.restart_threshold_secs must be a number of seconds >= 0 (got {t})"
            ));
        }
        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            return Err(format!("logging.level is not a valid filter: {e}"));
        }
        Ok(())
    }
}

impl PlayerSettings {
    /// Restart threshold as a `Duration`; the default when out of range.
    pub fn restart_threshold(&self) -> Duration {
        Duration::try_from_secs_f64(self.restart_threshold_secs).unwrap_or(DEFAULT_RESTART_THRESHOLD)
    }
}

/// Resolve the config path from `PLAYDECK_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("PLAYDECK_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `$XDG_CONFIG_HOME/playdeck/config.toml`, or `~/.config/playdeck/config.toml`
/// when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("playdeck").join("config.toml"))
}
