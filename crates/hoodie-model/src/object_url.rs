//! In-memory stand-in for browser object URLs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

pub const OBJECT_URL_PREFIX: &str = "blob:hoodie/";

type Entries = HashMap<String, Arc<[u8]>>;

/// Shared registry of `blob:` URLs. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct ObjectUrlStore {
    entries: Arc<Mutex<Entries>>,
}

impl ObjectUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create(&self, bytes: impl Into<Arc<[u8]>>) -> String {
        let url = format!("{OBJECT_URL_PREFIX}{}", Uuid::new_v4());
        self.entries().insert(url.clone(), bytes.into());
        url
    }

    /// Registers `bytes` and revokes the URL when the guard drops.
    pub fn scoped(&self, bytes: impl Into<Arc<[u8]>>) -> ScopedObjectUrl {
        ScopedObjectUrl {
            url: self.create(bytes),
            store: self.clone(),
        }
    }

    pub fn resolve(&self, url: &str) -> Option<Arc<[u8]>> {
        self.entries().get(url).cloned()
    }

    pub fn revoke(&self, url: &str) -> bool {
        self.entries().remove(url).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct ScopedObjectUrl {
    url: String,
    store: ObjectUrlStore,
}

impl ScopedObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ScopedObjectUrl {
    fn drop(&mut self) {
        self.store.revoke(&self.url);
    }
}
