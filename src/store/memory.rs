use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::BlobStore;

/// In-process blob store. Clones share the same slots, so a test can keep a
/// handle while a ledger owns another.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryBlobStore {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_blob(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
