use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::settings::{Settings, SettingsDiff, SettingsUpdate};

/// Use to look up the current widget settings.
#[async_trait]
pub trait LiveSettings: Send + Sync {
    /// While holding this guard, the state is read-only, and can be referenced.
    async fn lock_settings(&self) -> RwLockReadGuard<'_, Settings>;
}

#[derive(Clone)]
pub struct SettingsController {
    state: Arc<RwLock<Settings>>,
}

impl SettingsController {
    pub fn init(settings: Settings) -> Self {
        log::debug!("initial settings: {:?}", &settings);
        SettingsController {
            state: Arc::new(RwLock::new(settings)),
        }
    }

    /// Merge an update from the host into the current settings.
    pub async fn apply(&self, update: SettingsUpdate) -> Vec<SettingsDiff> {
        let mut settings = self.state.write().await;
        let diffs = settings.merge(update);
        if !diffs.is_empty() {
            log::info!("settings changed: {:?}", &diffs);
        }
        diffs
    }
}

#[async_trait]
impl LiveSettings for SettingsController {
    async fn lock_settings(&self) -> RwLockReadGuard<'_, Settings> {
        self.state.read().await
    }
}
