/*
 * Responsibility
 * - Orders の request/response DTO
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub item: String,
    pub quantity: u32,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.item.trim().is_empty() {
            return Err("item is required");
        }
        if self.quantity == 0 {
            return Err("quantity must be >= 1");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: u64,
    pub item: String,
    pub quantity: u32,
}
