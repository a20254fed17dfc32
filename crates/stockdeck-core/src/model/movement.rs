use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

/// A stock movement: units in and units out against one product.
///
/// The product reference is fixed when the movement is created and never
/// reassigned; the creation timestamp comes from the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: EntityId,
    pub product_id: EntityId,
    pub inbound: u64,
    pub outbound: u64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Client-side input for recording a new movement.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementDraft {
    pub product_id: EntityId,
    pub inbound: u64,
    pub outbound: u64,
}

/// Update payload for an existing movement -- amounts only, since the
/// product reference is immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementAmounts {
    pub inbound: u64,
    pub outbound: u64,
}
