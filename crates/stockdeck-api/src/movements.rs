// Stock movement endpoints.
//
// Movements live under the `/stocks/movement` subtree. A movement's
// product reference is fixed at creation; updates carry amounts only.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{MovementCreateRequest, MovementDto, MovementUpdateRequest};

impl ApiClient {
    /// `GET /stocks/movement` -- the full movement collection.
    pub async fn list_movements(&self) -> Result<Vec<MovementDto>, Error> {
        self.get("stocks/movement").await
    }

    /// `POST /stocks/movement` -- record an inbound/outbound movement
    /// against an existing product.
    pub async fn create_movement(
        &self,
        input: &MovementCreateRequest,
    ) -> Result<MovementDto, Error> {
        self.post("stocks/movement", input).await
    }

    /// `PATCH /stocks/movement/{id}` -- adjust a movement's amounts.
    pub async fn update_movement(
        &self,
        id: &str,
        input: &MovementUpdateRequest,
    ) -> Result<MovementDto, Error> {
        self.patch(&format!("stocks/movement/{id}"), input).await
    }

    /// `DELETE /stocks/movement/{id}` -- remove a movement.
    pub async fn delete_movement(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("stocks/movement/{id}")).await
    }
}
