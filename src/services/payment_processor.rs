use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::payment::{PaymentOutcome, PaymentRecord, PaymentRequest, PaymentStatus};
use crate::storage::{StoreError, TransactionStore};

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("user ID cannot be empty")]
    InvalidUserId,
    #[error("transaction ID cannot be empty")]
    InvalidTransaction,
    #[error("amount must be greater than 0")]
    InvalidAmount,
    #[error("payment store failure: {0}")]
    Store(#[from] StoreError),
}

impl PaymentError {
    /// Caller-fault errors, mapped to a bad-request signal at the gateway.
    pub fn is_validation(&self) -> bool {
        !matches!(self, PaymentError::Store(_))
    }
}

pub struct PaymentProcessor {
    store: Arc<dyn TransactionStore>,
}

impl PaymentProcessor {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    /// Processes one payment request: validate, answer replays from the
    /// stored record, otherwise persist a new completed record. Resubmitting
    /// a transaction id never charges twice.
    pub fn process(&self, request: &PaymentRequest) -> Result<PaymentOutcome, PaymentError> {
        self.validate(request)?;

        if self.store.exists(&request.transaction_id) {
            if let Some(existing) = self.store.get(&request.transaction_id) {
                info!("Transaction {} already processed", request.transaction_id);
                return Ok(PaymentOutcome::replayed(&existing));
            }
        }

        let record = PaymentRecord {
            transaction_id: request.transaction_id.clone(),
            user_id: request.user_id.clone(),
            amount: request.amount,
            status: PaymentStatus::Completed,
            created_at: Utc::now(),
        };
        let outcome = PaymentOutcome::completed(&record);

        // The store resolves racing creators: whoever loses answers from the
        // winner's record, exactly like a replay that arrived later.
        match self.store.put(record)? {
            None => {
                info!("Payment {} processed successfully", request.transaction_id);
                Ok(outcome)
            }
            Some(existing) => {
                warn!(
                    "Transaction {} was created concurrently, answering from stored record",
                    request.transaction_id
                );
                Ok(PaymentOutcome::replayed(&existing))
            }
        }
    }

    fn validate(&self, request: &PaymentRequest) -> Result<(), PaymentError> {
        if request.user_id.is_empty() {
            return Err(PaymentError::InvalidUserId);
        }
        if request.transaction_id.is_empty() {
            return Err(PaymentError::InvalidTransaction);
        }
        if request.amount <= 0.0 {
            return Err(PaymentError::InvalidAmount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryTransactionStore;
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn request(user_id: &str, amount: f64, transaction_id: &str) -> PaymentRequest {
        PaymentRequest {
            user_id: user_id.to_string(),
            amount,
            transaction_id: transaction_id.to_string(),
        }
    }

    fn processor() -> (Arc<InMemoryTransactionStore>, PaymentProcessor) {
        let store = Arc::new(InMemoryTransactionStore::new());
        let processor = PaymentProcessor::new(store.clone());
        (store, processor)
    }

    #[test]
    fn test_process_valid_payment() {
        let (store, processor) = processor();

        let outcome = processor
            .process(&request("user123", 100.50, "txn123"))
            .unwrap();

        assert_eq!(outcome.transaction_id, "txn123");
        assert_eq!(outcome.user_id, "user123");
        assert_eq!(outcome.amount, 100.50);
        assert_eq!(outcome.status, PaymentStatus::Completed);
        assert_eq!(outcome.message, "Payment processed successfully");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replay_returns_original_outcome() {
        let (store, processor) = processor();
        let req = request("user123", 100.50, "txn123");

        let first = processor.process(&req).unwrap();
        let replay = processor.process(&req).unwrap();

        assert_eq!(replay.transaction_id, first.transaction_id);
        assert_eq!(replay.user_id, first.user_id);
        assert_eq!(replay.amount, first.amount);
        assert_eq!(replay.status, first.status);
        assert_eq!(replay.message, "Transaction already processed");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replay_with_different_payload_returns_stored_record() {
        let (store, processor) = processor();

        processor
            .process(&request("user123", 100.50, "txn123"))
            .unwrap();

        // Same transaction id, different amount and user: the stored record
        // wins, the new payload is ignored.
        let replay = processor
            .process(&request("someone-else", 999.99, "txn123"))
            .unwrap();

        assert_eq!(replay.user_id, "user123");
        assert_eq!(replay.amount, 100.50);
        assert_eq!(replay.message, "Transaction already processed");
        assert_eq!(store.get("txn123").unwrap().amount, 100.50);
    }

    #[test]
    fn test_validation_order_user_id_first() {
        let (_, processor) = processor();

        let err = processor.process(&request("", -1.0, "")).unwrap_err();
        assert!(matches!(err, PaymentError::InvalidUserId));
    }

    #[test]
    fn test_empty_transaction_id_rejected() {
        let (store, processor) = processor();

        let err = processor
            .process(&request("user123", 100.50, ""))
            .unwrap_err();

        assert!(matches!(err, PaymentError::InvalidTransaction));
        assert_eq!(err.to_string(), "transaction ID cannot be empty");
        assert!(store.is_empty());
    }

    #[test]
    fn test_amount_boundaries() {
        let (_, processor) = processor();

        let err = processor
            .process(&request("user123", 0.0, "txn-zero"))
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidAmount));

        let err = processor
            .process(&request("user123", -10.0, "txn-negative"))
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidAmount));

        let outcome = processor
            .process(&request("user123", 0.01, "txn-small"))
            .unwrap();
        assert_eq!(outcome.status, PaymentStatus::Completed);
    }

    #[test]
    fn test_rejected_request_writes_nothing() {
        let (store, processor) = processor();

        processor
            .process(&request("user123", -5.0, "txn123"))
            .unwrap_err();
        assert!(store.is_empty());

        // The id stays usable once the request is corrected.
        let outcome = processor
            .process(&request("user123", 5.0, "txn123"))
            .unwrap();
        assert_eq!(outcome.message, "Payment processed successfully");
    }

    #[test]
    fn test_concurrent_same_transaction_single_charge() {
        let (store, processor) = processor();
        let processor = Arc::new(processor);
        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let processor = processor.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    processor
                        .process(&request("user123", 100.50, "txn-race"))
                        .unwrap()
                })
            })
            .collect();

        let outcomes: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        let created = outcomes
            .iter()
            .filter(|outcome| outcome.message == "Payment processed successfully")
            .count();
        let replayed = outcomes
            .iter()
            .filter(|outcome| outcome.message == "Transaction already processed")
            .count();

        assert_eq!(created, 1);
        assert_eq!(replayed, threads - 1);
        assert_eq!(store.len(), 1);
        assert!(outcomes
            .iter()
            .all(|outcome| outcome.status == PaymentStatus::Completed));
    }

    struct FailingStore;

    impl TransactionStore for FailingStore {
        fn put(&self, _record: PaymentRecord) -> Result<Option<PaymentRecord>, StoreError> {
            Err(StoreError::Unavailable("disk offline".to_string()))
        }

        fn exists(&self, _transaction_id: &str) -> bool {
            false
        }

        fn get(&self, _transaction_id: &str) -> Option<PaymentRecord> {
            None
        }
    }

    #[test]
    fn test_store_failure_propagates() {
        let processor = PaymentProcessor::new(Arc::new(FailingStore));

        let err = processor
            .process(&request("user123", 100.50, "txn123"))
            .unwrap_err();

        assert!(matches!(err, PaymentError::Store(_)));
        assert!(!err.is_validation());
    }
}
