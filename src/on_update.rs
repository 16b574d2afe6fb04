// Standard Library Imports
use std::{
    fmt::{self, Debug, Formatter},
    sync::{Arc, RwLock},
};

// Public API ==========================================================================================================

/// A slot for the callback that tells the UI runtime to re-render. The `Uploader` calls it after every change to its
/// state, including every progress tick, and it's a no-op until a callback has been set
#[derive(Clone, Default)]
pub struct OnUpdate(Arc<RwLock<Option<OnUpdateCallback>>>);

pub type OnUpdateCallback = Arc<dyn Fn() + Send + Sync>;

impl OnUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, on_update: OnUpdateCallback) {
        *self.0.write().unwrap() = Some(on_update);
    }

    pub fn clear(&self) {
        *self.0.write().unwrap() = None;
    }

    pub fn call(&self) {
        // NOTE: Cloning the `Arc` out means the lock isn't held whilst the callback runs, so a callback is free to
        // replace itself (or clear the slot) without deadlocking
        let on_update = self.0.read().unwrap().clone();
        if let Some(on_update) = on_update {
            on_update();
        }
    }
}

impl Debug for OnUpdate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let is_set = self.0.read().unwrap().is_some();
        f.debug_struct("OnUpdate").field("is_set", &is_set).finish()
    }
}

// Unit Tests ==========================================================================================================
