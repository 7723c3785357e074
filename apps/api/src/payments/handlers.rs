use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::payments::VerifyPaymentRequest;
use crate::state::AppState;

/// POST /api/verify-payment
pub async fn handle_verify_payment(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<VerifyPaymentRequest>,
) -> Result<Json<Value>, AppError> {
    let tx_hash = req.tx_hash.trim();
    if tx_hash.is_empty() {
        return Err(AppError::Validation("txHash is required".to_string()));
    }

    if !state.payments.verify(tx_hash).await {
        return Err(AppError::Validation("Invalid payment".to_string()));
    }

    info!(tx_hash, "payment verified");
    Ok(Json(json!({ "message": "Payment verified" })))
}
