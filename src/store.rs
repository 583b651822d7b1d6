// 💾 Points Store - Receipt id → points, kept in memory only
// Entries are write-once and live as long as the process.

use crate::error::StoreError;
use crate::receipt::ReceiptId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

// ============================================================================
// STORE TRAIT
// ============================================================================

/// Storage seam for scored receipts, shared across request handlers
pub trait PointsStore: Send + Sync {
    /// Record points for a new id. Fails if the id is already taken.
    fn put(&self, id: ReceiptId, points: u64) -> Result<(), StoreError>;

    /// Points stored for `id`, if any
    fn get(&self, id: &ReceiptId) -> Option<u64>;

    /// Number of stored receipts
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<ReceiptId, u64>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PointsStore for InMemoryStore {
    fn put(&self, id: ReceiptId, points: u64) -> Result<(), StoreError> {
        // Inserts are atomic, a poisoned map is still consistent
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        match entries.entry(id) {
            Entry::Occupied(entry) => Err(StoreError::AlreadyExists(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(points);
                Ok(())
            }
        }
    }

    fn get(&self, id: &ReceiptId) -> Option<u64> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(id).copied()
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
