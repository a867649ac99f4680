/*
 * Responsibility
 * - /orders handler (認可済みのリクエストだけがここに届く)
 * - Json を extractor で受け、DTO validation → in-memory store
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::dto::orders::{CreateOrderRequest, OrderResponse},
    error::AppError,
    state::AppState,
};

pub async fn list_orders(State(state): State<AppState>) -> Json<Vec<OrderResponse>> {
    Json(state.orders.read().await.clone())
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::InvalidRequest(msg.to_string()))?;

    let mut orders = state.orders.write().await;
    // append-only store: id = insertion order (1-based)
    let order = OrderResponse {
        id: orders.len() as u64 + 1,
        item: req.item,
        quantity: req.quantity,
    };
    orders.push(order.clone());

    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<u64>,
) -> Result<Json<OrderResponse>, AppError> {
    state
        .orders
        .read()
        .await
        .iter()
        .find(|o| o.id == order_id)
        .cloned()
        .map(Json)
        .ok_or(AppError::NotFound)
}
