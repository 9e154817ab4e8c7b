//! Dashboard backend: HTTP client, response models and errors.

pub mod client;
pub mod error;
pub mod models;

pub use client::{ApiClient, DashboardApi, ItemsQuery};
pub use error::{ApiError, ApiResult};
pub use models::{BestsellerCatalog, BestsellerItem, Item, ParserStatus, TriggerResponse};

#[cfg(test)]
pub(crate) mod mock;
