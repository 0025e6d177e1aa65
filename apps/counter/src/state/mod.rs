//! # Application State Management
//!
//! Two independent state types, each behind its own mutex:
//!
//! - [`CatalogState`] - the local product snapshot (stale-tolerant)
//! - [`SessionState`] - the in-progress bill (cart, staged input, guard)
//!
//! They are deliberately separate: a catalog reload must never block
//! bill entry, and a long submission must never block a catalog read.

pub mod catalog;
pub mod session;

pub use catalog::{Catalog, CatalogState};
pub use session::{Session, SessionState, StagedInput};
