
use std::env;

use tempfile::TempDir;

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    #[allow(dead_code)]
    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Create a temp config directory and set GATE_CONFIG_DIR
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set("GATE_CONFIG_DIR", temp.path().to_str().unwrap());
    (temp, guard)
}

/// Set the full complement of JWT env vars so validation passes
pub(crate) fn set_valid_jwt_env() -> Vec<EnvGuard> {
    vec![
        EnvGuard::set(
            "GATE_AUTH_JWT_SECRET",
            "this-is-a-very-long-secret-key-for-testing",
        ),
        EnvGuard::set("GATE_AUTH_JWT_ISSUER", "https://auth.example.com"),
        EnvGuard::set("GATE_AUTH_JWT_AUDIENCE", "gatehouse-api"),
    ]
}
