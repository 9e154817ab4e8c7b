//! Catalog section: server-filtered product list with client-side sorting.

pub mod controller;
pub mod sort;

pub use controller::{CatalogControls, CatalogController};
pub use sort::{SortField, SortOrder};
