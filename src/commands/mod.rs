//! CLI command implementations.

pub mod bestsellers;
pub mod catalog;
pub mod dashboard;
pub mod refresh;

pub use bestsellers::BestsellersCommand;
pub use catalog::CatalogCommand;
pub use dashboard::DashboardCommand;
pub use refresh::{AssumeYes, RefreshCommand, RefreshPrompt, TerminalPrompt};
