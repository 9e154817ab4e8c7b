//! Bestsellers section: category-keyed snapshot with a confirm-gated scraper refresh.

pub mod controller;
pub mod state;

pub use controller::{BestsellersController, MountError, RefreshOutcome};
pub use state::{RefreshEvent, RefreshState};
