use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use super::config::IdentityDef;
use super::entry::{Identity, IdentityId};
use super::error::RegistryError;
use super::registry::IdentityRegistry;

/// A registry that can still grow after start-up (mods, plugins).
///
/// Readers share the lock; registration takes it exclusively.
pub struct SharedRegistry<T: Identity> {
    inner: Arc<RwLock<IdentityRegistry<T>>>,
}

impl<T: Identity> Clone for SharedRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Identity> SharedRegistry<T> {
    pub fn new(registry: IdentityRegistry<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    // A failed register never leaves partial state, so a poisoned lock is still usable.
    pub fn read(&self) -> RwLockReadGuard<'_, IdentityRegistry<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, identity: T) -> Result<IdentityId, RegistryError> {
        let mut reg = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let id = reg.register(identity)?;
        log::debug!("late {} registration as {:?}", T::KIND, id);
        Ok(id)
    }

    pub fn register_def(&self, def: &IdentityDef) -> Result<IdentityId, RegistryError> {
        let mut reg = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        reg.register_def(def)
    }
}
