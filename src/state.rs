/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - demo 用の in-memory order book
 */
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::v1::dto::orders::OrderResponse;

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub orders: Arc<RwLock<Vec<OrderResponse>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
