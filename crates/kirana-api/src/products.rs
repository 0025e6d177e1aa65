//! # Product Endpoints
//!
//! Catalog CRUD against the remote collaborator.
//!
//! ## Endpoints
//! ```text
//! GET    /products          → Vec<Product>         (full catalog snapshot)
//! POST   /products          → Product              (server-assigned id)
//! PUT    /products/{id}     → Product              (updated record)
//! DELETE /products/{id}     → 2xx, body ignored
//! ```
//!
//! The client never mutates catalog state locally: every edit goes through
//! here and the caller refreshes its snapshot afterwards.

use tracing::debug;

use kirana_core::{Product, ProductInput};

use crate::client::ApiClient;
use crate::error::ClientError;

/// Product endpoint group, borrowed from an [`ApiClient`].
#[derive(Debug)]
pub struct ProductsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProductsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        ProductsApi { client }
    }

    /// Fetches the full product list.
    ///
    /// This is the only source of the catalog snapshot. The caller decides
    /// what to do on failure (the counter app keeps its previous snapshot).
    pub async fn list(&self) -> Result<Vec<Product>, ClientError> {
        debug!("GET /products");
        let response = self
            .client
            .http()
            .get(self.client.url("/products"))
            .send()
            .await?;
        self.client.decode(response).await
    }

    /// Creates a product; the server assigns the id.
    ///
    /// A duplicate code comes back as a 400 with the server's detail
    /// message, surfaced unchanged.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, ClientError> {
        debug!(code = %input.code, "POST /products");
        let response = self
            .client
            .http()
            .post(self.client.url("/products"))
            .json(input)
            .send()
            .await?;
        self.client.decode(response).await
    }

    /// Updates an existing product by server id.
    pub async fn update(&self, id: i64, input: &ProductInput) -> Result<Product, ClientError> {
        debug!(id, code = %input.code, "PUT /products/{{id}}");
        let response = self
            .client
            .http()
            .put(self.client.url(&format!("/products/{}", id)))
            .json(input)
            .send()
            .await?;
        self.client.decode(response).await
    }

    /// Deletes a product by server id.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        debug!(id, "DELETE /products/{{id}}");
        let response = self
            .client
            .http()
            .delete(self.client.url(&format!("/products/{}", id)))
            .send()
            .await?;
        self.client.expect_success(response).await
    }
}
