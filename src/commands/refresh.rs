//! Manual scraper refresh, gated by a confirmation prompt.

use crate::api::{ApiClient, DashboardApi};
use crate::bestsellers::{BestsellersController, RefreshOutcome};
use crate::config::Config;
use crate::format::Formatter;
use crate::page::StaticPage;
use anyhow::{Context, Result};
use dialoguer::Confirm;
use std::sync::Arc;
use tracing::info;

const CONFIRM_QUESTION: &str = "Re-run the bestseller scraper now? This can take several minutes.";

/// Host side of the confirmation modal and loader overlay.
pub trait RefreshPrompt {
    /// Shows the modal; returns true when the user confirms.
    fn confirm(&self, question: &str) -> Result<bool>;

    /// Shows or hides the loader overlay.
    fn loading(&self, _visible: bool) {}
}

/// Asks on the terminal (defaulting to no), reports progress on stderr.
pub struct TerminalPrompt;

impl RefreshPrompt for TerminalPrompt {
    fn confirm(&self, question: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .context("Failed to read confirmation")
    }

    fn loading(&self, visible: bool) {
        if visible {
            eprintln!("Running scraper...");
        }
    }
}

/// Confirms without asking (`--yes`).
pub struct AssumeYes;

impl RefreshPrompt for AssumeYes {
    fn confirm(&self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Triggers the backend scraper and shows the refreshed bestsellers.
pub struct RefreshCommand {
    config: Config,
}

impl RefreshCommand {
    /// Creates a new refresh command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the confirm-gated refresh and returns formatted output.
    pub async fn execute(&self, prompt: &dyn RefreshPrompt) -> Result<String> {
        let client = ApiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_api(Arc::new(client), prompt).await
    }

    /// Runs the refresh with a provided backend (for testing).
    ///
    /// A failed trigger is returned as an error carrying the alert text.
    pub async fn execute_with_api(
        &self,
        api: Arc<dyn DashboardApi>,
        prompt: &dyn RefreshPrompt,
    ) -> Result<String> {
        let mut controller = BestsellersController::mount(&StaticPage::full(), api)?;

        controller.open_modal();
        if !prompt.confirm(CONFIRM_QUESTION)? {
            controller.cancel();
            info!("Refresh cancelled by user");
            return Ok("Refresh cancelled.".to_string());
        }

        controller.begin_confirm();
        prompt.loading(true);
        let outcome = controller.finish_refresh().await;
        prompt.loading(false);

        match outcome {
            Some(RefreshOutcome::Completed { message }) => {
                let formatter = Formatter::new(self.config.format);
                let view = controller.view();
                Ok(format!("{}\n\n{}", message, formatter.format_bestsellers(&view)))
            }
            Some(RefreshOutcome::Failed { message }) => anyhow::bail!(message),
            None => anyhow::bail!("Refresh was not started"),
        }
    }
}
