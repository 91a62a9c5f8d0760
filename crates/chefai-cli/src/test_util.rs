//! Helpers for tests that touch process-wide environment variables.

use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

use chefai_db::config::DbConfig;

use crate::config::API_KEY_ENV_VAR;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that read or write environment variables.
pub fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

const SCOPED_VARS: [&str; 3] = ["XDG_CONFIG_HOME", DbConfig::ENV_VAR, API_KEY_ENV_VAR];

/// Points `XDG_CONFIG_HOME` at a fresh temp dir and clears the chefai
/// override variables. Everything is restored on drop.
///
/// Hold [`lock_env`] for as long as this is alive.
pub struct ScopedConfigHome {
    _dir: TempDir,
    saved: Vec<(&'static str, Option<String>)>,
}

impl ScopedConfigHome {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp config home");
        let saved = SCOPED_VARS
            .iter()
            .map(|&name| (name, std::env::var(name).ok()))
            .collect();

        unsafe { std::env::set_var("XDG_CONFIG_HOME", dir.path()) };
        unsafe { std::env::remove_var(DbConfig::ENV_VAR) };
        unsafe { std::env::remove_var(API_KEY_ENV_VAR) };

        Self { _dir: dir, saved }
    }
}

impl Drop for ScopedConfigHome {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(v) => unsafe { std::env::set_var(name, v) },
                None => unsafe { std::env::remove_var(name) },
            }
        }
    }
}
