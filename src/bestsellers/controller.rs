//! Bestsellers section: category selector, status line and manual scraper refresh.

use super::state::{RefreshEvent, RefreshState};
use crate::api::{ApiResult, BestsellerCatalog, DashboardApi, ParserStatus};
use crate::page::{self, HostPage};
use crate::view::{bestseller_grid, BestsellersView, CardGrid, SelectOption, SelectView, StatusText};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

pub const CHOOSE_CATEGORY: &str = "-- Please choose a category --";
pub const NO_CATEGORIES: &str = "No categories found. Run parser.";
pub const CATEGORIES_ERROR: &str = "Error loading categories.";
const TRIGGER_FALLBACK: &str = "Parser failed to start.";

/// The page is missing an element the section needs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("required element #{0} not found on page")]
    MissingElement(&'static str),
}

/// Result of a confirmed manual refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Scraper ran; carries the server message
    Completed { message: String },
    /// Trigger failed; carries the alert shown to the user
    Failed { message: String },
}

/// Drives the bestsellers section.
pub struct BestsellersController {
    api: Arc<dyn DashboardApi>,
    catalog: BestsellerCatalog,
    selector: SelectView,
    grid: CardGrid,
    status: StatusText,
    refresh: RefreshState,
    alerts: Vec<String>,
}

impl BestsellersController {
    /// Mounts the controller. Fails without side effects if a required element is missing.
    pub fn mount(host: &impl HostPage, api: Arc<dyn DashboardApi>) -> Result<Self, MountError> {
        if let Some(missing) = host.first_missing(page::BESTSELLERS_REQUIRED) {
            error!("Bestsellers section not initialized: #{} is missing", missing);
            return Err(MountError::MissingElement(missing));
        }

        debug!("Bestsellers section mounted");
        Ok(Self {
            api,
            catalog: BestsellerCatalog::new(),
            selector: SelectView {
                options: vec![SelectOption::placeholder(CHOOSE_CATEGORY)],
                selected: String::new(),
            },
            grid: CardGrid::default(),
            status: StatusText::Pending,
            refresh: RefreshState::Idle,
            alerts: Vec::new(),
        })
    }

    /// Initial load: status and data are requested concurrently and applied independently.
    pub async fn load(&mut self) {
        let (status, catalog) = tokio::join!(self.api.parser_status(), self.api.bestsellers());
        self.apply_status(status);
        self.apply_bestsellers(catalog);
    }

    /// Re-fetches the last-updated status.
    pub async fn update_status(&mut self) -> &StatusText {
        let status = self.api.parser_status().await;
        self.apply_status(status);
        &self.status
    }

    /// Re-fetches the bestseller snapshot and repopulates the selector.
    pub async fn fetch_and_display(&mut self) {
        let catalog = self.api.bestsellers().await;
        self.apply_bestsellers(catalog);
    }

    /// Applies a status response.
    pub fn apply_status(&mut self, status: ApiResult<ParserStatus>) {
        if matches!(&status, Ok(ParserStatus { is_running: true, .. })) {
            info!("Scraper is currently running");
        }

        self.status = match status {
            Ok(ParserStatus { last_updated: Some(ts), .. }) => StatusText::Updated(ts),
            Ok(_) => StatusText::NotGenerated,
            Err(err) => {
                warn!("Failed to get parser status: {}", err);
                StatusText::Unavailable
            }
        };
    }

    /// Applies a bestsellers response. A failure keeps the previous snapshot.
    pub fn apply_bestsellers(&mut self, catalog: ApiResult<BestsellerCatalog>) {
        match catalog {
            Ok(catalog) => self.set_catalog(catalog),
            Err(err) => {
                warn!("Failed to load bestsellers: {}", err);
                self.selector = SelectView {
                    options: vec![SelectOption::placeholder(CATEGORIES_ERROR)],
                    selected: String::new(),
                };
                self.grid = CardGrid::default();
            }
        }
    }

    /// The current snapshot.
    pub fn catalog(&self) -> &BestsellerCatalog {
        &self.catalog
    }

    /// Replaces the snapshot wholesale and repopulates the selector.
    pub fn set_catalog(&mut self, catalog: BestsellerCatalog) {
        info!("Loaded {} bestseller categories", catalog.len());
        self.catalog = catalog;
        self.populate_categories();
    }

    fn populate_categories(&mut self) {
        if self.catalog.is_empty() {
            self.selector = SelectView {
                options: vec![SelectOption::placeholder(NO_CATEGORIES)],
                selected: String::new(),
            };
            self.grid = CardGrid::default();
            return;
        }

        let previous = std::mem::take(&mut self.selector.selected);
        let mut options = vec![SelectOption::placeholder(CHOOSE_CATEGORY)];
        options.extend(
            self.catalog
                .names()
                .into_iter()
                .map(|name| SelectOption { value: name.to_string(), label: name.to_string() }),
        );

        let selected = if self.catalog.contains(&previous) { previous } else { String::new() };
        self.selector = SelectView { options, selected };

        let selected = self.selector.selected.clone();
        self.render_category(&selected);
    }

    /// Selects a category and renders its cards; `""` or an unknown name clears the grid.
    pub fn select_category(&mut self, name: &str) -> &CardGrid {
        self.selector.selected =
            if self.catalog.contains(name) { name.to_string() } else { String::new() };
        self.render_category(name);
        &self.grid
    }

    fn render_category(&mut self, name: &str) {
        self.grid = match self.catalog.get(name) {
            Some(items) if !name.is_empty() => bestseller_grid(items),
            _ => CardGrid::default(),
        };
        debug!("Rendered {} bestseller cards for {:?}", self.grid.len(), name);
    }

    fn transition(&mut self, event: RefreshEvent) -> bool {
        match self.refresh.next(event) {
            Some(next) => {
                debug!("Refresh {:?} -> {:?} on {:?}", self.refresh, next, event);
                self.refresh = next;
                true
            }
            None => {
                debug!("Ignoring {:?} while {:?}", event, self.refresh);
                false
            }
        }
    }

    /// Manual-refresh button: shows the confirmation modal.
    pub fn open_modal(&mut self) -> bool {
        self.transition(RefreshEvent::RefreshClicked)
    }

    /// Cancel button: hides the modal, nothing else happens.
    pub fn cancel(&mut self) -> bool {
        self.transition(RefreshEvent::Cancelled)
    }

    /// Confirm button, first half: hides the modal and shows the loader.
    pub fn begin_confirm(&mut self) -> bool {
        self.transition(RefreshEvent::Confirmed)
    }

    /// Confirm button, second half: triggers the scraper and refreshes on success.
    ///
    /// The loader is hidden once the request settles, whatever the outcome.
    /// Returns `None` if no confirmed refresh is pending.
    pub async fn finish_refresh(&mut self) -> Option<RefreshOutcome> {
        if !self.refresh.loader_visible() {
            return None;
        }

        let outcome = self.run_trigger().await;
        self.transition(RefreshEvent::Settled);
        Some(outcome)
    }

    /// Confirm button: [`begin_confirm`](Self::begin_confirm) then
    /// [`finish_refresh`](Self::finish_refresh).
    pub async fn confirm(&mut self) -> Option<RefreshOutcome> {
        if !self.begin_confirm() {
            return None;
        }
        self.finish_refresh().await
    }

    async fn run_trigger(&mut self) -> RefreshOutcome {
        match self.api.trigger_parser().await {
            Ok(response) => {
                info!("Scraper finished: {}", response.message);
                self.alerts.push(response.message.clone());
                self.update_status().await;
                self.fetch_and_display().await;
                RefreshOutcome::Completed { message: response.message }
            }
            Err(err) => {
                warn!("Scraper trigger failed: {}", err);
                let message =
                    format!("Error starting parser: {}", err.detail().unwrap_or(TRIGGER_FALLBACK));
                self.alerts.push(message.clone());
                RefreshOutcome::Failed { message }
            }
        }
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.refresh
    }

    pub fn status(&self) -> &StatusText {
        &self.status
    }

    pub fn grid(&self) -> &CardGrid {
        &self.grid
    }

    pub fn selector(&self) -> &SelectView {
        &self.selector
    }

    /// Drains alerts raised since the last call.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Snapshot of the whole section.
    pub fn view(&self) -> BestsellersView {
        BestsellersView {
            status: self.status.clone(),
            selector: self.selector.clone(),
            grid: self.grid.clone(),
            modal_visible: self.refresh.modal_visible(),
            loader_visible: self.refresh.loader_visible(),
            alerts: self.alerts.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::api::{ApiError, BestsellerItem};
    use crate::page::StaticPage;

    fn items(n: usize) -> Vec<BestsellerItem> {
        (1..=n)
            .map(|i| BestsellerItem {
                title: Some(format!("Product {}", i)),
                rank: Some(format!("#{}", i)),
                ..BestsellerItem::default()
            })
            .collect()
    }

    fn sample_catalog() -> BestsellerCatalog {
        let mut catalog = BestsellerCatalog::new();
        catalog.insert("Electronics", items(5));
        catalog.insert("Automotive", items(3));
        catalog.insert("Beauty", Vec::new());
        catalog
    }

    fn mount(api: &Arc<MockApi>) -> BestsellersController {
        BestsellersController::mount(&StaticPage::full(), api.clone()).unwrap()
    }

    fn selectable(controller: &BestsellersController) -> Vec<String> {
        controller.selector().selectable().map(|o| o.value.clone()).collect()
    }

    #[test]
    fn test_mount_fails_fast_on_missing_element() {
        for &id in page::BESTSELLERS_REQUIRED {
            let api = Arc::new(MockApi::new());
            let page = StaticPage::full().without(id);
            let err = BestsellersController::mount(&page, api).err().unwrap();
            assert_eq!(err, MountError::MissingElement(id));
            assert!(err.to_string().contains(id));
        }
    }

    #[test]
    fn test_mount_ignores_optional_elements() {
        let api = Arc::new(MockApi::new());
        let page = StaticPage::full().without(page::LAST_UPDATED_TEXT);
        assert!(BestsellersController::mount(&page, api).is_ok());
    }

    #[tokio::test]
    async fn test_load_populates_status_and_categories() {
        let api = Arc::new(MockApi::new());
        api.set_catalog(Some(sample_catalog()));
        api.set_status(Some(ParserStatus {
            last_updated: Some("2024-05-01 10:00:00".to_string()),
            is_running: false,
        }));

        let mut controller = mount(&api);
        assert_eq!(controller.status(), &StatusText::Pending);
        controller.load().await;

        assert_eq!(controller.status().text(), "Last updated: 2024-05-01 10:00:00");
        assert_eq!(selectable(&controller), vec!["Electronics", "Automotive", "Beauty"]);
        assert_eq!(controller.selector().placeholder_label(), Some(CHOOSE_CATEGORY));
        assert_eq!(controller.selector().selected, "");
        assert!(controller.grid().is_empty());
    }

    #[tokio::test]
    async fn test_status_states() {
        let api = Arc::new(MockApi::new());
        let mut controller = mount(&api);

        api.set_status(Some(ParserStatus::default()));
        assert_eq!(controller.update_status().await, &StatusText::NotGenerated);

        api.set_status(None);
        assert_eq!(controller.update_status().await, &StatusText::Unavailable);

        api.set_status(Some(ParserStatus { last_updated: Some("t".to_string()), is_running: true }));
        assert_eq!(controller.update_status().await, &StatusText::Updated("t".to_string()));
    }

    #[tokio::test]
    async fn test_select_category_renders_its_items() {
        let api = Arc::new(MockApi::new());
        api.set_catalog(Some(sample_catalog()));
        let mut controller = mount(&api);
        controller.fetch_and_display().await;

        assert_eq!(controller.select_category("Electronics").len(), 5);
        assert_eq!(controller.selector().selected, "Electronics");
        assert_eq!(controller.select_category("Automotive").len(), 3);
        assert_eq!(controller.grid().cards[0].badge.as_deref(), Some("#1"));

        assert!(controller.select_category("").is_empty());
        assert_eq!(controller.selector().selected, "");

        assert!(controller.select_category("Beauty").is_empty());
        assert!(controller.select_category("Garden").is_empty());
        assert_eq!(controller.selector().selected, "");
    }

    #[tokio::test]
    async fn test_selection_preserved_across_fetches() {
        let api = Arc::new(MockApi::new());
        api.set_catalog(Some(sample_catalog()));
        let mut controller = mount(&api);
        controller.fetch_and_display().await;
        controller.select_category("Automotive");

        let mut updated = BestsellerCatalog::new();
        updated.insert("Automotive", items(4));
        updated.insert("Kitchen", items(1));
        api.set_catalog(Some(updated));
        controller.fetch_and_display().await;

        assert_eq!(controller.selector().selected, "Automotive");
        assert_eq!(controller.grid().len(), 4);
        assert_eq!(selectable(&controller), vec!["Automotive", "Kitchen"]);
    }

    #[tokio::test]
    async fn test_selection_reset_when_category_disappears() {
        let api = Arc::new(MockApi::new());
        api.set_catalog(Some(sample_catalog()));
        let mut controller = mount(&api);
        controller.fetch_and_display().await;
        controller.select_category("Electronics");

        let mut updated = BestsellerCatalog::new();
        updated.insert("Kitchen", items(2));
        api.set_catalog(Some(updated));
        controller.fetch_and_display().await;

        assert_eq!(controller.selector().selected, "");
        assert_eq!(controller.selector().placeholder_label(), Some(CHOOSE_CATEGORY));
        assert!(controller.grid().is_empty());
    }

    #[tokio::test]
    async fn test_empty_catalog_shows_no_categories() {
        let api = Arc::new(MockApi::new());
        api.set_catalog(Some(BestsellerCatalog::new()));
        let mut controller = mount(&api);
        controller.fetch_and_display().await;

        assert_eq!(controller.selector().selectable().count(), 0);
        assert_eq!(controller.selector().placeholder_label(), Some(NO_CATEGORIES));
        assert!(controller.grid().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_fetch_failure_keeps_snapshot() {
        let api = Arc::new(MockApi::new());
        api.set_catalog(Some(sample_catalog()));
        let mut controller = mount(&api);
        controller.fetch_and_display().await;

        api.set_catalog(None);
        controller.fetch_and_display().await;

        assert_eq!(controller.selector().placeholder_label(), Some(CATEGORIES_ERROR));
        assert_eq!(controller.selector().selectable().count(), 0);
        assert_eq!(controller.catalog().len(), 3);
    }

    #[test]
    fn test_set_catalog_replaces_wholesale() {
        let api = Arc::new(MockApi::new());
        let mut controller = mount(&api);
        controller.set_catalog(sample_catalog());

        let mut replacement = BestsellerCatalog::new();
        replacement.insert("Tools", items(2));
        controller.set_catalog(replacement);

        assert_eq!(controller.catalog().names(), vec!["Tools"]);
        assert!(controller.catalog().get("Electronics").is_none());
    }

    #[test]
    fn test_apply_status_error() {
        let api = Arc::new(MockApi::new());
        let mut controller = mount(&api);
        controller.apply_status(Err(ApiError::Status { status: 503, detail: None }));
        assert_eq!(controller.status(), &StatusText::Unavailable);
    }

    #[tokio::test]
    async fn test_confirm_shows_loader_and_posts() {
        let api = Arc::new(MockApi::new());
        api.set_catalog(Some(sample_catalog()));
        api.set_status(Some(ParserStatus { last_updated: Some("now".to_string()), is_running: false }));
        let mut controller = mount(&api);

        assert!(controller.open_modal());
        let view = controller.view();
        assert!(view.modal_visible);
        assert!(!view.loader_visible);

        assert!(controller.begin_confirm());
        let view = controller.view();
        assert!(!view.modal_visible);
        assert!(view.loader_visible);
        assert_eq!(MockApi::calls(&api.trigger_calls), 0);

        let outcome = controller.finish_refresh().await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Completed { message: "Parser finished.".to_string() });
        assert_eq!(MockApi::calls(&api.trigger_calls), 1);

        let view = controller.view();
        assert!(!view.loader_visible);
        assert!(!view.modal_visible);
        assert_eq!(view.alerts, vec!["Parser finished."]);
        assert_eq!(view.status, StatusText::Updated("now".to_string()));
        assert_eq!(view.selector.selectable().count(), 3);
        assert_eq!(controller.refresh_state(), RefreshState::Idle);
    }

    #[tokio::test]
    async fn test_cancel_never_posts() {
        let api = Arc::new(MockApi::new());
        let mut controller = mount(&api);

        assert!(controller.open_modal());
        assert!(controller.cancel());

        let view = controller.view();
        assert!(!view.modal_visible);
        assert!(!view.loader_visible);
        assert!(controller.finish_refresh().await.is_none());
        assert_eq!(MockApi::calls(&api.trigger_calls), 0);
        assert!(controller.take_alerts().is_empty());
    }

    #[tokio::test]
    async fn test_trigger_failure_alerts_detail_and_hides_loader() {
        let api = Arc::new(MockApi::new());
        api.fail_trigger(500, Some("scrape failed"));
        let mut controller = mount(&api);

        controller.open_modal();
        let outcome = controller.confirm().await.unwrap();

        assert!(matches!(outcome, RefreshOutcome::Failed { .. }));
        let alerts = controller.take_alerts();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("scrape failed"));
        assert!(!controller.view().loader_visible);
        assert_eq!(MockApi::calls(&api.trigger_calls), 1);
        assert_eq!(MockApi::calls(&api.catalog_calls), 0);
    }

    #[tokio::test]
    async fn test_trigger_failure_without_detail() {
        let api = Arc::new(MockApi::new());
        api.fail_trigger(502, None);
        let mut controller = mount(&api);

        controller.open_modal();
        let outcome = controller.confirm().await.unwrap();
        assert_eq!(
            outcome,
            RefreshOutcome::Failed { message: "Error starting parser: Parser failed to start.".to_string() }
        );
    }

    #[tokio::test]
    async fn test_confirm_without_modal_is_ignored() {
        let api = Arc::new(MockApi::new());
        let mut controller = mount(&api);

        assert!(controller.confirm().await.is_none());
        assert!(!controller.cancel());
        assert_eq!(MockApi::calls(&api.trigger_calls), 0);
    }

    #[test]
    fn test_take_alerts_drains() {
        let api = Arc::new(MockApi::new());
        let mut controller = mount(&api);
        controller.alerts.push("hello".to_string());

        assert_eq!(controller.take_alerts(), vec!["hello"]);
        assert!(controller.take_alerts().is_empty());
        assert!(controller.view().alerts.is_empty());
    }
}
