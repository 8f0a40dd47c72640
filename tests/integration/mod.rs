use std::env;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use mybento::config::{self, AppConfig};
use tempfile::TempDir;

// `MYBENTO_HOME` is process-wide; tests that touch it take turns.
static HOME_LOCK: Mutex<()> = Mutex::new(());

pub struct IntegrationHarness {
    workspace: TempDir,
    _guard: MutexGuard<'static, ()>,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let guard = HOME_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let workspace = TempDir::new().expect("failed to create temp workspace");
        env::set_var("MYBENTO_HOME", workspace.path());
        Self {
            workspace,
            _guard: guard,
        }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn save_config(&self, config: &AppConfig) {
        config::save(config).expect("failed to save config");
    }
}

mod click_tracking;
mod config_store;
mod plan_scenarios;
mod render_page;
pub mod support;
