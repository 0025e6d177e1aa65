//! # Catalog Snapshot State
//!
//! The client's local, possibly-stale copy of the server-held product data.
//!
//! ## Staleness Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Snapshot Lifecycle                           │
//! │                                                                         │
//! │  startup ─────► reload() ──ok──► snapshot replaced                      │
//! │                    │                                                    │
//! │                    └──err─► previous snapshot kept (empty on first      │
//! │                             load), failure logged, never fatal          │
//! │                                                                         │
//! │  product edit ─► collaborator call ─► reload()                          │
//! │  sale accepted ─► reload()   (stock changed server-side)                │
//! │                                                                         │
//! │  Stock checks against this snapshot are a UX convenience only;          │
//! │  the authoritative check happens server-side on submission.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use kirana_api::ApiClient;
use kirana_core::Product;

/// The catalog snapshot. Leaf data; no billing logic lives here.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    loaded: bool,
}

impl Catalog {
    /// Creates an empty, not-yet-loaded catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Returns the products in the snapshot.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// True once at least one load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Looks up a product by its business code.
    pub fn find_by_code(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    /// Replaces the snapshot with freshly fetched products.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
        self.loaded = true;
    }
}

/// Shared catalog state.
///
/// ## Thread Safety
/// `Arc<Mutex<Catalog>>`: reloads and reads may come from concurrent
/// tasks, and snapshot replacement must be atomic from a reader's view.
#[derive(Debug, Clone)]
pub struct CatalogState {
    inner: Arc<Mutex<Catalog>>,
}

impl CatalogState {
    /// Creates state holding an empty catalog.
    pub fn new() -> Self {
        CatalogState {
            inner: Arc::new(Mutex::new(Catalog::new())),
        }
    }

    /// Executes a function with read access to the catalog.
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog) -> R,
    {
        let catalog = self.inner.lock().expect("Catalog mutex poisoned");
        f(&catalog)
    }

    /// Executes a function with write access to the catalog.
    pub fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Catalog) -> R,
    {
        let mut catalog = self.inner.lock().expect("Catalog mutex poisoned");
        f(&mut catalog)
    }

    /// Returns an owned copy of the current snapshot.
    ///
    /// The billing engine takes the catalog by slice; cloning here keeps
    /// the lock hold time short.
    pub fn snapshot(&self) -> Vec<Product> {
        self.with_catalog(|c| c.products().to_vec())
    }

    /// Fetches the product list and replaces the snapshot.
    ///
    /// On failure the previous snapshot stays in place (empty if nothing
    /// was ever loaded) and the failure is logged. Returns whether the
    /// reload succeeded so callers can mention stale data if they care.
    pub async fn reload(&self, client: &ApiClient) -> bool {
        match client.products().list().await {
            Ok(products) => {
                info!(count = products.len(), "catalog snapshot refreshed");
                self.with_catalog_mut(|c| c.replace(products));
                true
            }
            Err(err) => {
                warn!(error = %err, "catalog reload failed, keeping previous snapshot");
                false
            }
        }
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(code: &str, stock: i64) -> Product {
        Product {
            id: 1,
            code: code.to_string(),
            name: format!("Product {}", code),
            cost_price: 8.0,
            sell_price: 10.0,
            gst_percent: 5.0,
            stock,
        }
    }

    #[test]
    fn test_catalog_starts_empty_and_unloaded() {
        let catalog = Catalog::new();
        assert!(catalog.products().is_empty());
        assert!(!catalog.is_loaded());
    }

    #[test]
    fn test_replace_marks_loaded() {
        let mut catalog = Catalog::new();
        catalog.replace(vec![product("A1", 5)]);
        assert!(catalog.is_loaded());
        assert_eq!(catalog.products().len(), 1);

        // A later replace with an empty list is still "loaded":
        // an empty catalog is distinct from a never-loaded one.
        catalog.replace(Vec::new());
        assert!(catalog.is_loaded());
        assert!(catalog.products().is_empty());
    }

    #[test]
    fn test_find_by_code() {
        let mut catalog = Catalog::new();
        catalog.replace(vec![product("A1", 5), product("B2", 0)]);
        assert_eq!(catalog.find_by_code("B2").unwrap().code, "B2");
        assert!(catalog.find_by_code("NOPE").is_none());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_snapshot() {
        use kirana_api::{ApiClient, ApiConfig};

        let state = CatalogState::new();
        state.with_catalog_mut(|c| c.replace(vec![product("A1", 5)]));

        // Nothing listens here; the reload fails fast.
        let client = ApiClient::new(ApiConfig::new("http://127.0.0.1:1")).unwrap();
        assert!(!state.reload(&client).await);

        assert_eq!(state.snapshot().len(), 1);
        assert!(state.with_catalog(|c| c.is_loaded()));
    }

    #[test]
    fn test_state_snapshot_is_owned_copy() {
        let state = CatalogState::new();
        state.with_catalog_mut(|c| c.replace(vec![product("A1", 5)]));

        let snapshot = state.snapshot();
        state.with_catalog_mut(|c| c.replace(Vec::new()));

        // The copy is unaffected by later replacement.
        assert_eq!(snapshot.len(), 1);
    }
}
