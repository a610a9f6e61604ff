use super::*;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that touch the environment.
fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// # Safety
/// Callers must hold [`env_guard`].
unsafe fn clear_client_env() {
    unsafe {
        std::env::remove_var("AGRICOMPASS_BACKEND_URL");
        std::env::remove_var("AGRICOMPASS_SESSION_FILE");
        std::env::remove_var("AGRICOMPASS_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults() {
    let _env = env_guard();
    unsafe { clear_client_env() };

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.backend_url, "http://localhost:8000");
    assert_eq!(cfg.session_file, PathBuf::from(".agricompass/session.json"));
    assert_eq!(cfg.connect_timeout, Duration::from_secs(10));
}

#[test]
fn from_env_parses_overrides() {
    let _env = env_guard();
    unsafe {
        clear_client_env();
        std::env::set_var("AGRICOMPASS_BACKEND_URL", "https://api.example.test/");
        std::env::set_var("AGRICOMPASS_SESSION_FILE", "/tmp/agc.json");
        std::env::set_var("AGRICOMPASS_CONNECT_TIMEOUT_SECS", "3");
    }

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.backend_url, "https://api.example.test");
    assert_eq!(cfg.session_file, PathBuf::from("/tmp/agc.json"));
    assert_eq!(cfg.connect_timeout, Duration::from_secs(3));

    unsafe { clear_client_env() };
}

#[test]
fn from_env_rejects_bad_timeout() {
    let _env = env_guard();
    unsafe {
        clear_client_env();
        std::env::set_var("AGRICOMPASS_CONNECT_TIMEOUT_SECS", "soon");
    }

    let err = ClientConfig::from_env().unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidNumber { key: "AGRICOMPASS_CONNECT_TIMEOUT_SECS", value: "soon".to_owned() }
    );

    unsafe { clear_client_env() };
}

#[test]
fn normalize_backend_url_requires_http_scheme() {
    assert!(matches!(normalize_backend_url("ftp://x"), Err(ConfigError::InvalidBackendUrl(_))));
    assert!(matches!(normalize_backend_url("localhost:8000"), Err(ConfigError::InvalidBackendUrl(_))));
}

#[test]
fn normalize_backend_url_blank_uses_default() {
    assert_eq!(normalize_backend_url("  ").unwrap(), DEFAULT_BACKEND_URL);
}

#[test]
fn with_backend_url_overrides_and_trims() {
    let cfg = ClientConfig::default().with_backend_url("http://10.0.0.2:9000//").unwrap();
    assert_eq!(cfg.backend_url, "http://10.0.0.2:9000");
}
