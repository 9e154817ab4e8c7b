//! amz-dashboard - Terminal dashboard for the Amazon catalog and bestsellers API
//!
//! Headless controllers for the catalog grid and the bestsellers section,
//! driven by a command-line host that prints their view descriptions.

pub mod api;
pub mod bestsellers;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod page;
pub mod view;

pub use api::{ApiClient, ApiError, DashboardApi};
pub use bestsellers::BestsellersController;
pub use catalog::CatalogController;
pub use config::Config;
pub use dashboard::Dashboard;
