use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::{StoreError, TransactionStore};
use crate::models::payment::PaymentRecord;

/// In-memory transaction store over a sharded concurrent map. Writes to the
/// same key serialize on the shard lock, so duplicate creation is resolved
/// inside `put` rather than by the caller.
#[derive(Default)]
pub struct InMemoryTransactionStore {
    records: DashMap<String, PaymentRecord>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn put(&self, record: PaymentRecord) -> Result<Option<PaymentRecord>, StoreError> {
        match self.records.entry(record.transaction_id.clone()) {
            Entry::Occupied(existing) => Ok(Some(existing.get().clone())),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(None)
            }
        }
    }

    fn exists(&self, transaction_id: &str) -> bool {
        self.records.contains_key(transaction_id)
    }

    fn get(&self, transaction_id: &str) -> Option<PaymentRecord> {
        self.records
            .get(transaction_id)
            .map(|entry| entry.value().clone())
    }
}
