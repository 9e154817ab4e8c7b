//! Full-page command: both sections, loaded side by side.

use crate::api::{ApiClient, DashboardApi};
use crate::config::{Config, OutputFormat};
use crate::dashboard::Dashboard;
use crate::format::Formatter;
use crate::page::StaticPage;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Renders the whole dashboard page.
pub struct DashboardCommand {
    config: Config,
}

impl DashboardCommand {
    /// Creates a new dashboard command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads both sections and returns formatted output.
    pub async fn execute(&self, category: Option<&str>) -> Result<String> {
        let client = ApiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_api(Arc::new(client), category).await
    }

    /// Loads both sections with a provided backend (for testing).
    ///
    /// A catalog failure is reported inline; the bestsellers section still renders.
    pub async fn execute_with_api(
        &self,
        api: Arc<dyn DashboardApi>,
        category: Option<&str>,
    ) -> Result<String> {
        let mut dashboard =
            Dashboard::mount(&StaticPage::full(), api, self.config.catalog_controls());
        let catalog_result = dashboard.load().await;

        let bestsellers = dashboard
            .bestsellers
            .as_mut()
            .context("Bestsellers section is not available")?;
        if let Some(category) = category {
            if !category.is_empty() && !bestsellers.catalog().contains(category) {
                let available = bestsellers.catalog().names().join(", ");
                anyhow::bail!("Unknown category: '{}'. Available: {}", category, available);
            }
            bestsellers.select_category(category);
        }
        let bestsellers_view = bestsellers.view();

        let grid = dashboard.catalog.as_ref().map(|c| c.view());
        let formatter = Formatter::new(self.config.format);

        if self.config.format == OutputFormat::Json {
            let value = serde_json::json!({
                "catalog": grid,
                "catalog_error": catalog_result.as_ref().err().map(|e| e.to_string()),
                "bestsellers": bestsellers_view,
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        let catalog_section = match (&catalog_result, grid) {
            (Err(err), _) => format!("Could not load catalog: {}", err),
            (Ok(()), Some(grid)) => formatter.format_grid(grid),
            (Ok(()), None) => "Catalog section is not available.".to_string(),
        };

        Ok(format!(
            "== Catalog ==\n\n{}\n\n== Daily Bestsellers ==\n\n{}",
            catalog_section,
            formatter.format_bestsellers(&bestsellers_view)
        ))
    }
}
