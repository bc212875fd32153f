use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Sets or removes an env var for the lifetime of the guard.
struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

fn write_config(body: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, body).unwrap();
    (dir, path)
}

#[test]
fn resolve_config_path_prefers_explicit_env_var() {
    let _lock = env_lock();
    let _g = EnvGuard::set("PLAYDECK_CONFIG_PATH", "/tmp/playdeck-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/playdeck-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home/playdeck/config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.config/playdeck/config.toml")
    );
}

#[test]
fn defaults_match_documented_values() {
    let s = Settings::default();
    assert_eq!(s.player.restart_threshold_secs, 5.0);
    assert_eq!(s.player.restart_threshold(), Duration::from_secs(5));
    assert!(!s.player.shuffle);
    assert!(s.player.seed.is_none());
    assert_eq!(s.audio.quit_fade_out_ms, 500);
    assert_eq!(s.library.name_fields, vec![NameField::Title]);
    assert!(s.logging.file.is_none());
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();
    let (_dir, path) = write_config(
        r#"
[player]
restart_threshold_secs = 2.5
shuffle = true
seed = 42

[audio]
quit_fade_out_ms = 0

[library]
extensions = ["flac"]
recursive = false
name_fields = ["artist", "title"]
name_separator = " :: "

[ui]
play_icon = ">"
pause_icon = "||"

[logging]
file = "/tmp/playdeck.log"
level = "debug"
"#,
    );

    let _g1 = EnvGuard::set("PLAYDECK_CONFIG_PATH", path.to_str().unwrap());
    let _g2 = EnvGuard::remove("PLAYDECK__PLAYER__RESTART_THRESHOLD_SECS");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.restart_threshold(), Duration::from_millis(2500));
    assert!(s.player.shuffle);
    assert_eq!(s.player.seed, Some(42));
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.library.extensions, vec!["flac".to_string()]);
    assert!(!s.library.recursive);
    assert_eq!(s.library.name_fields, vec![NameField::Artist, NameField::Title]);
    assert_eq!(s.library.name_separator, " :: ");
    assert_eq!(s.ui.play_icon, ">");
    assert_eq!(s.ui.pause_icon, "||");
    // Untouched keys keep their defaults.
    assert_eq!(s.ui.shuffle_on_icon, UiSettings::default().shuffle_on_icon);
    assert_eq!(s.logging.file, Some(PathBuf::from("/tmp/playdeck.log")));
    assert_eq!(s.logging.level, "debug");
}

#[test]
fn env_overrides_config_file() {
    let _lock = env_lock();
    let (_dir, path) = write_config(
        r#"
[player]
restart_threshold_secs = 5.0
"#,
    );

    let _g1 = EnvGuard::set("PLAYDECK_CONFIG_PATH", path.to_str().unwrap());
    let _g2 = EnvGuard::set("PLAYDECK__PLAYER__RESTART_THRESHOLD_SECS", "12");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.restart_threshold(), Duration::from_secs(12));
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let _g1 = EnvGuard::set("PLAYDECK_CONFIG_PATH", missing.to_str().unwrap());
    let _g2 = EnvGuard::remove("PLAYDECK__PLAYER__RESTART_THRESHOLD_SECS");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.restart_threshold_secs, 5.0);
}

#[test]
fn validate_rejects_negative_or_non_finite_threshold() {
    let mut s = Settings::default();
    s.player.restart_threshold_secs = -1.0;
    assert!(s.validate().is_err());
    s.player.restart_threshold_secs = f64::NAN;
    assert!(s.validate().is_err());
    s.player.restart_threshold_secs = 0.0;
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_bad_log_filter() {
    let mut s = Settings::default();
    s.logging.level = "playdeck=notalevel".to_string();
    assert!(s.validate().is_err());
}

#[test]
fn partial_tables_fall_back_to_field_defaults() {
    let s: Settings = toml::from_str(
        r#"
        [player]
        shuffle = true

        [library]
        name_fields = ["artist", "title"]
        "#,
    )
    .unwrap();
    assert!(s.player.shuffle);
    assert_eq!(s.player.restart_threshold_secs, 5.0);
    assert_eq!(s.library.name_fields, vec![NameField::Artist, NameField::Title]);
    assert_eq!(s.library.name_separator, " - ");
    assert_eq!(s.audio.quit_fade_out_ms, 500);
}

#[test]
fn unknown_name_field_is_rejected() {
    let r: Result<Settings, _> = toml::from_str("[library]\nname_fields = [\"genre\"]\n");
    assert!(r.is_err());
}

#[test]
fn validate_rejects_oversized_threshold() {
    let mut s = Settings::default();
    s.player.restart_threshold_secs = 1e30;
    assert!(s.validate().is_err());
    s.player.restart_threshold_secs = f64::INFINITY;
    assert!(s.validate().is_err());
    // Out-of-range values never panic when converted.
    assert_eq!(s.player.restart_threshold(), Duration::from_secs(5));
}

#[test]
fn load_or_default_reports_oversized_threshold_from_env() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let _g1 = EnvGuard::set("PLAYDECK_CONFIG_PATH", missing.to_str().unwrap());
    let _g2 = EnvGuard::set("PLAYDECK__PLAYER__RESTART_THRESHOLD_SECS", "1e30");

    let (s, problem) = Settings::load_or_default();
    assert_eq!(s.player.restart_threshold(), Duration::from_secs(5));
    assert!(problem.unwrap().contains("restart_threshold_secs"));
}

#[test]
fn load_or_default_reports_unparsable_file() {
    let _lock = env_lock();
    let (_dir, path) = write_config("[player]\nshuffle = \"sometimes\"\n");
    let _g1 = EnvGuard::set("PLAYDECK_CONFIG_PATH", path.to_str().unwrap());
    let _g2 = EnvGuard::remove("PLAYDECK__PLAYER__RESTART_THRESHOLD_SECS");

    let (s, problem) = Settings::load_or_default();
    assert!(!s.player.shuffle);
    assert!(problem.unwrap().starts_with("failed to load config"));
}

#[test]
fn load_or_default_is_quiet_for_valid_config() {
    let _lock = env_lock();
    let (_dir, path) = write_config("[player]\nshuffle = true\n");
    let _g1 = EnvGuard::set("PLAYDECK_CONFIG_PATH", path.to_str().unwrap());
    let _g2 = EnvGuard::remove("PLAYDECK__PLAYER__RESTART_THRESHOLD_SECS");

    let (s, problem) = Settings::load_or_default();
    assert!(s.player.shuffle);
    assert!(problem.is_none());
}
