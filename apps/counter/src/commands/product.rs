//! # Product Commands
//!
//! Catalog listing and CRUD. The collaborator owns the catalog; every
//! successful mutation is followed by a snapshot reload so the counter
//! sees its own change.

use tracing::info;

use kirana_api::ApiClient;
use kirana_core::validation::validate_product_input;
use kirana_core::{Product, ProductInput};

use crate::error::ApiError;
use crate::state::CatalogState;

/// Lists the catalog, optionally filtered by a search query.
///
/// Refreshes the snapshot first; if the reload fails the previous
/// snapshot is served (possibly empty on a cold start) rather than
/// failing the listing.
pub async fn list_products(
    client: &ApiClient,
    catalog: &CatalogState,
    search: Option<&str>,
) -> Vec<Product> {
    catalog.reload(client).await;
    let snapshot = catalog.snapshot();
    match search {
        Some(query) if !query.trim().is_empty() => filter_products(&snapshot, query),
        _ => snapshot,
    }
}

/// Filters products by code or name, case-insensitively.
pub fn filter_products(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.code.to_lowercase().contains(&needle) || p.name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Creates a product.
///
/// Input is validated locally before any network traffic; a rejected
/// form never reaches the collaborator.
pub async fn add_product(
    client: &ApiClient,
    catalog: &CatalogState,
    input: &ProductInput,
) -> Result<Product, ApiError> {
    validate_product_input(input)?;
    let created = client.products().create(input).await?;
    info!(code = %created.code, "product created");
    catalog.reload(client).await;
    Ok(created)
}

/// Updates a product by server id.
pub async fn update_product(
    client: &ApiClient,
    catalog: &CatalogState,
    id: i64,
    input: &ProductInput,
) -> Result<Product, ApiError> {
    validate_product_input(input)?;
    let updated = client.products().update(id, input).await?;
    info!(code = %updated.code, "product updated");
    catalog.reload(client).await;
    Ok(updated)
}

/// Deletes a product by server id.
pub async fn delete_product(
    client: &ApiClient,
    catalog: &CatalogState,
    id: i64,
) -> Result<(), ApiError> {
    client.products().delete(id).await?;
    info!(id, "product deleted");
    catalog.reload(client).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(code: &str, name: &str) -> Product {
        Product {
            id: 1,
            code: code.to_string(),
            name: name.to_string(),
            cost_price: 8.0,
            sell_price: 10.0,
            gst_percent: 5.0,
            stock: 4,
        }
    }

    #[test]
    fn test_filter_matches_code_and_name_case_insensitively() {
        let products = vec![
            product("SUG-1", "Sugar 1kg"),
            product("TEA-250", "Assam Tea 250g"),
            product("RICE-5", "Basmati Rice 5kg"),
        ];

        let by_code = filter_products(&products, "sug");
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].code, "SUG-1");

        let by_name = filter_products(&products, "TEA");
        assert_eq!(by_name.len(), 1);

        // Substring anywhere in the name counts.
        let by_fragment = filter_products(&products, "rice");
        assert_eq!(by_fragment.len(), 1);
        assert_eq!(by_fragment[0].code, "RICE-5");
    }

    #[test]
    fn test_filter_trims_query() {
        let products = vec![product("SUG-1", "Sugar 1kg")];
        assert_eq!(filter_products(&products, "  sugar  ").len(), 1);
    }

    #[test]
    fn test_filter_no_match_yields_empty() {
        let products = vec![product("SUG-1", "Sugar 1kg")];
        assert!(filter_products(&products, "soap").is_empty());
    }
}
