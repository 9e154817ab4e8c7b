//! Bestsellers and status command implementations.

use crate::api::{ApiClient, DashboardApi};
use crate::bestsellers::BestsellersController;
use crate::config::Config;
use crate::format::Formatter;
use crate::page::StaticPage;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Shows the bestsellers section, optionally with one category selected.
pub struct BestsellersCommand {
    config: Config,
}

impl BestsellersCommand {
    /// Creates a new bestsellers command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads the bestsellers section and returns formatted output.
    pub async fn execute(&self, category: Option<&str>) -> Result<String> {
        let client = ApiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_api(Arc::new(client), category).await
    }

    /// Loads the section with a provided backend (for testing).
    pub async fn execute_with_api(
        &self,
        api: Arc<dyn DashboardApi>,
        category: Option<&str>,
    ) -> Result<String> {
        let mut controller = BestsellersController::mount(&StaticPage::full(), api)?;
        controller.load().await;

        if let Some(category) = category {
            if !category.is_empty() && !controller.catalog().contains(category) {
                let available = controller.catalog().names().join(", ");
                anyhow::bail!("Unknown category: '{}'. Available: {}", category, available);
            }

            info!("Selecting category: {}", category);
            controller.select_category(category);
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_bestsellers(&controller.view()))
    }

    /// Fetches only the last-updated status line.
    pub async fn status(&self) -> Result<String> {
        let client = ApiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.status_with_api(Arc::new(client)).await
    }

    /// Fetches the status line with a provided backend (for testing).
    pub async fn status_with_api(&self, api: Arc<dyn DashboardApi>) -> Result<String> {
        let mut controller = BestsellersController::mount(&StaticPage::full(), api)?;
        let status = controller.update_status().await;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_status(status))
    }
}
