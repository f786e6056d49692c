mod app;
mod handlers;
mod models;
mod services;
mod storage;

use app::config::Config;
use axum::{
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::Value;
use services::PaymentProcessor;
use std::sync::Arc;
use storage::InMemoryTransactionStore;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    info!("Starting payment service on port {}", config.server_port);

    let store = Arc::new(InMemoryTransactionStore::new());
    let processor = Arc::new(PaymentProcessor::new(store));

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/payments", post(handlers::payments::create_payment))
        .with_state(processor);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_handler() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "payment-service"
    }))
}
