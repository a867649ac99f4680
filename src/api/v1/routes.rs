/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - authz の適用は app.rs 側 (nest の前) で行う
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::orders::{create_order, get_order, list_orders};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/{order_id}", get(get_order))
}
