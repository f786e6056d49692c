use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub user_id: String,
    pub amount: f64,
    pub transaction_id: String,
}

/// Stored representation of a completed payment. Written once on first
/// acceptance of a transaction id, never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub transaction_id: String,
    pub user_id: String,
    pub amount: f64,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub transaction_id: String,
    pub user_id: String,
    pub amount: f64,
    pub status: PaymentStatus,
    pub message: String,
}

impl PaymentOutcome {
    pub fn completed(record: &PaymentRecord) -> Self {
        Self::from_record(record, "Payment processed successfully")
    }

    /// Outcome for a transaction id that is already on record. Mirrors the
    /// stored record, not the request that triggered the replay.
    pub fn replayed(record: &PaymentRecord) -> Self {
        Self::from_record(record, "Transaction already processed")
    }

    pub fn rejected(request: &PaymentRequest, message: String) -> Self {
        Self {
            transaction_id: request.transaction_id.clone(),
            user_id: request.user_id.clone(),
            amount: request.amount,
            status: PaymentStatus::Failed,
            message,
        }
    }

    fn from_record(record: &PaymentRecord, message: &str) -> Self {
        Self {
            transaction_id: record.transaction_id.clone(),
            user_id: record.user_id.clone(),
            amount: record.amount,
            status: record.status,
            message: message.to_string(),
        }
    }
}
