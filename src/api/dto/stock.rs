//! Stock-related DTOs for API requests and responses.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{NewStock, Stock, UpdateStock};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new stock record.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStockRequest {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "quantity cannot be negative"))]
    pub quantity: i32,
    #[validate(custom(function = validate_price))]
    pub price: BigDecimal,
    #[validate(length(max = 100, message = "category must be at most 100 characters"))]
    pub category: Option<String>,
}

impl CreateStockRequest {
    /// Converts the request DTO into a NewStock model for insertion.
    pub fn into_new_stock(self) -> NewStock {
        NewStock {
            name: self.name,
            quantity: self.quantity,
            price: self.price,
            category: self.category,
        }
    }
}

/// Request body for replacing a stock record.
///
/// PUT is a full replace, so the same fields are required as on create.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStockRequest {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "quantity cannot be negative"))]
    pub quantity: i32,
    #[validate(custom(function = validate_price))]
    pub price: BigDecimal,
    #[validate(length(max = 100, message = "category must be at most 100 characters"))]
    pub category: Option<String>,
}

impl UpdateStockRequest {
    /// Converts the request DTO into an UpdateStock changeset.
    pub fn into_changes(self) -> UpdateStock {
        UpdateStock {
            name: self.name,
            quantity: self.quantity,
            price: self.price,
            category: self.category,
        }
    }
}

fn validate_price(price: &BigDecimal) -> Result<(), ValidationError> {
    if *price < BigDecimal::from(0) {
        let mut error = ValidationError::new("price");
        error.message = Some("price cannot be negative".into());
        return Err(error);
    }
    Ok(())
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for one stock record.
#[derive(Debug, Serialize)]
pub struct StockResponse {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: BigDecimal,
    pub category: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Stock> for StockResponse {
    fn from(stock: Stock) -> Self {
        Self {
            id: stock.id,
            name: stock.name,
            quantity: stock.quantity,
            price: stock.price,
            category: stock.category,
            created_at: stock.created_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            updated_at: stock.updated_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}

/// Confirmation body for mutations that do not return a record.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
