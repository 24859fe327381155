//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// record store and the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    store: Arc<MemoryStore>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Creates a new application state over an empty store.
    pub fn new(config: AppConfig) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), config)
    }

    /// Creates a new application state over an existing store.
    pub fn with_store(store: Arc<MemoryStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Returns the record store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Returns a shared handle to the record store.
    pub fn shared_store(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.store)
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_one_store() {
        let state = AppState::new(AppConfig::default());
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.shared_store(), &clone.shared_store()));
    }
}
