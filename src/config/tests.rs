use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

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

#[test]
fn resolve_config_path_prefers_cantabile_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CANTABILE_CONFIG_PATH", "/tmp/cantabile-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/cantabile-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("cantabile")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_falls_back_to_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state")
            .join("cantabile")
            .join("cantabile.log")
    );
}

#[test]
fn defaults_prefer_english_with_one_second_lead() {
    let s = Settings::default();
    assert_eq!(s.lyrics.preferred_language, "en");
    assert_eq!(s.lyrics.lead_ms, 1000);
    assert_eq!(s.lyrics.offset_step_ms, 500);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
quit_fade_out_ms = 123

[controls]
scrub_seconds = 9

[ui]
header_text = "hello"
notice_seconds = 5

[library]
extensions = ["mp3"]
recursive = false

[lyrics]
preferred_language = "fre"
lead_ms = 250
offset_step_ms = -100

[log]
level = "cantabile=debug"
file = "/tmp/cantabile.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CANTABILE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CANTABILE__LYRICS__LEAD_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.quit_fade_out_ms, 123);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.notice_seconds, 5);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert_eq!(s.lyrics.preferred_language, "fre");
    assert_eq!(s.lyrics.lead_ms, 250);
    assert_eq!(s.lyrics.offset_step_ms, -100);
    assert_eq!(s.log.level, "cantabile=debug");
    assert_eq!(
        s.log.file.as_deref(),
        Some(std::path::Path::new("/tmp/cantabile.log"))
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[lyrics]
lead_ms = 1000
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CANTABILE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CANTABILE__LYRICS__LEAD_MS", "0");

    let s = Settings::load().unwrap();
    assert_eq!(s.lyrics.lead_ms, 0);
}

#[test]
fn zero_offset_step_is_rejected() {
    let mut s = Settings::default();
    s.lyrics.offset_step_ms = 0;
    assert!(s.validate().is_err());
}

#[test]
fn offset_step_is_bounded_in_both_directions() {
    let mut s = Settings::default();
    s.lyrics.offset_step_ms = -100;
    assert!(s.validate().is_ok());

    s.lyrics.offset_step_ms = 60_000;
    assert!(s.validate().is_ok());

    s.lyrics.offset_step_ms = 60_001;
    assert!(s.validate().is_err());

    s.lyrics.offset_step_ms = i64::MIN;
    assert!(s.validate().is_err());
}
