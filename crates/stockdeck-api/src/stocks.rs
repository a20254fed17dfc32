// Stock (product) endpoints.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{StockDto, StockInput};

impl ApiClient {
    /// `GET /stocks` -- the full product collection.
    pub async fn list_stocks(&self) -> Result<Vec<StockDto>, Error> {
        self.get("stocks").await
    }

    /// `GET /stocks/{id}` -- a single product.
    pub async fn get_stock(&self, id: &str) -> Result<StockDto, Error> {
        self.get(&format!("stocks/{id}")).await
    }

    /// `POST /stocks` -- create a product. The service assigns the id.
    pub async fn create_stock(&self, input: &StockInput) -> Result<StockDto, Error> {
        self.post("stocks", input).await
    }

    /// `PATCH /stocks/{id}` -- update a product's name, quantity, or price.
    pub async fn update_stock(&self, id: &str, input: &StockInput) -> Result<StockDto, Error> {
        self.patch(&format!("stocks/{id}"), input).await
    }

    /// `DELETE /stocks/{id}` -- remove a product.
    pub async fn delete_stock(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("stocks/{id}")).await
    }
}
