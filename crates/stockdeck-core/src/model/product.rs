use serde::{Deserialize, Serialize};

use super::EntityId;

/// A product in the inventory.
///
/// Quantity and price are never negative -- the types enforce the
/// quantity half, the service validates the rest. The id is assigned by
/// the service and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub quantity: u64,
    pub price: f64,
}

impl Product {
    /// Total value of the units on hand.
    #[allow(clippy::cast_precision_loss)]
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// Client-side input for creating or updating a product. Carries no id --
/// the service assigns one on create and the path names it on update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub quantity: u64,
    pub price: f64,
}
