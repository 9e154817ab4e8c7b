//! Catalog command implementation.

use crate::api::{ApiClient, DashboardApi};
use crate::catalog::CatalogController;
use crate::config::Config;
use crate::format::Formatter;
use crate::page::StaticPage;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Shows the sorted catalog grid.
pub struct CatalogCommand {
    config: Config,
}

impl CatalogCommand {
    /// Creates a new catalog command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the catalog and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let client = ApiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_api(Arc::new(client)).await
    }

    /// Fetches the catalog with a provided backend (for testing).
    pub async fn execute_with_api(&self, api: Arc<dyn DashboardApi>) -> Result<String> {
        let mut controller =
            CatalogController::mount(&StaticPage::full(), api, self.config.catalog_controls())
                .context("Catalog section is not available")?;

        let grid = controller.refresh().await.context("Failed to load catalog")?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_grid(grid))
    }
}
