pub mod memory;

pub use memory::InMemoryTransactionStore;

use thiserror::Error;

use crate::models::payment::PaymentRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Storage contract the payment processor depends on. Implementations must
/// be safe to call from concurrent request contexts and must never expose a
/// partially written record.
pub trait TransactionStore: Send + Sync {
    /// Stores the record under its transaction id, unless one is already
    /// present. Returns the previously stored record when the key is taken,
    /// so a racing creator can answer from it instead of overwriting.
    fn put(&self, record: PaymentRecord) -> Result<Option<PaymentRecord>, StoreError>;

    /// True iff a record has been stored under the given transaction id.
    fn exists(&self, transaction_id: &str) -> bool;

    fn get(&self, transaction_id: &str) -> Option<PaymentRecord>;
}
