use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use crate::models::payment::{PaymentOutcome, PaymentRequest};
use crate::services::PaymentProcessor;

pub async fn create_payment(
    State(processor): State<Arc<PaymentProcessor>>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<PaymentOutcome>), StatusCode> {
    let request: PaymentRequest = match serde_json::from_value(payload) {
        Ok(req) => req,
        Err(e) => {
            error!("Invalid payment request: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    info!("Received payment request: {}", request.transaction_id);

    match processor.process(&request) {
        Ok(outcome) => Ok((StatusCode::OK, Json(outcome))),
        Err(err) => {
            error!("Payment {} rejected: {}", request.transaction_id, err);
            let status = if err.is_validation() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            Ok((status, Json(PaymentOutcome::rejected(&request, err.to_string()))))
        }
    }
}
