//! Catalog section: fetch, sort and render the static product list.

use super::sort::{sort_items, SortField, SortOrder};
use crate::api::{ApiResult, DashboardApi, Item, ItemsQuery};
use crate::page::{self, HostPage};
use crate::view::{catalog_grid, CardGrid};
use std::sync::Arc;
use tracing::{debug, info};

/// Values of the catalog's sort and filter controls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CatalogControls {
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    /// Sent to the server; `None` omits the filter
    pub min_rating: Option<f32>,
    pub max_price: Option<f64>,
}

impl CatalogControls {
    fn query(&self) -> ItemsQuery {
        ItemsQuery { min_rating: self.min_rating, max_price: self.max_price }
    }
}

/// Drives the catalog grid. Every control change re-fetches from the server.
pub struct CatalogController {
    api: Arc<dyn DashboardApi>,
    controls: CatalogControls,
    grid: CardGrid,
}

impl CatalogController {
    /// Mounts the controller, or returns `None` when the page has no product container.
    pub fn mount(
        host: &impl HostPage,
        api: Arc<dyn DashboardApi>,
        controls: CatalogControls,
    ) -> Option<Self> {
        if !host.has_element(page::PRODUCTS_CONTAINER) {
            debug!("No {} on page, catalog section disabled", page::PRODUCTS_CONTAINER);
            return None;
        }

        Some(Self { api, controls, grid: CardGrid::default() })
    }

    pub fn controls(&self) -> CatalogControls {
        self.controls
    }

    /// The grid as last rendered.
    pub fn view(&self) -> &CardGrid {
        &self.grid
    }

    /// Fetches items, sorts them and replaces the grid.
    ///
    /// On error the previous grid is left as it was.
    pub async fn refresh(&mut self) -> ApiResult<&CardGrid> {
        let controls = self.controls;
        info!(
            "Refreshing catalog (sort: {} {}, min rating: {:?})",
            controls.sort_field, controls.sort_order, controls.min_rating
        );

        let items = self.api.items(&controls.query()).await?;
        Ok(self.render(items))
    }

    /// Sorts `items` with the current controls and replaces the grid.
    pub fn render(&mut self, mut items: Vec<Item>) -> &CardGrid {
        sort_items(&mut items, self.controls.sort_field, self.controls.sort_order);
        self.grid = catalog_grid(&items);
        debug!("Rendered {} catalog cards", self.grid.len());
        &self.grid
    }

    pub async fn set_sort_field(&mut self, field: SortField) -> ApiResult<&CardGrid> {
        self.controls.sort_field = field;
        self.refresh().await
    }

    pub async fn set_sort_order(&mut self, order: SortOrder) -> ApiResult<&CardGrid> {
        self.controls.sort_order = order;
        self.refresh().await
    }

    pub async fn set_min_rating(&mut self, min_rating: Option<f32>) -> ApiResult<&CardGrid> {
        self.controls.min_rating = min_rating;
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::page::StaticPage;
    use tokio_test::{assert_err, assert_ok};

    fn make_item(title: &str, price: &str, rating: &str, rank: i64) -> Item {
        Item {
            title: title.to_string(),
            price: Some(price.to_string()),
            rating: Some(rating.to_string()),
            rank,
            ..Item::default()
        }
    }

    fn sample_items() -> Vec<Item> {
        vec![
            make_item("Keyboard", "$49.99", "4.2 out of 5 stars", 2),
            make_item("Mouse", "$24.99", "4.7 out of 5 stars", 1),
            make_item("Monitor", "$1,199.00", "3.9 out of 5 stars", 3),
        ]
    }

    fn titles(grid: &CardGrid) -> Vec<&str> {
        grid.cards.iter().map(|c| c.title.as_str()).collect()
    }

    fn mount(api: &Arc<MockApi>, controls: CatalogControls) -> CatalogController {
        CatalogController::mount(&StaticPage::full(), api.clone(), controls).unwrap()
    }

    #[test]
    fn test_mount_without_container() {
        let api = Arc::new(MockApi::new());
        let page = StaticPage::full().without(page::PRODUCTS_CONTAINER);
        assert!(CatalogController::mount(&page, api, CatalogControls::default()).is_none());
    }

    #[tokio::test]
    async fn test_refresh_sorts_by_rank_by_default() {
        let api = Arc::new(MockApi::new());
        api.set_items(Some(sample_items()));
        let mut controller = mount(&api, CatalogControls::default());

        let grid = controller.refresh().await.unwrap();
        assert_eq!(titles(grid), vec!["Mouse", "Keyboard", "Monitor"]);
        assert_eq!(grid.cards[0].meta, "Rank: 1");
    }

    #[tokio::test]
    async fn test_control_changes_refetch() {
        let api = Arc::new(MockApi::new());
        api.set_items(Some(sample_items()));
        let mut controller = mount(&api, CatalogControls::default());

        let grid = controller.set_sort_field(SortField::Price).await.unwrap();
        assert_eq!(titles(grid), vec!["Mouse", "Keyboard", "Monitor"]);

        let grid = controller.set_sort_order(SortOrder::Desc).await.unwrap();
        assert_eq!(titles(grid), vec!["Monitor", "Keyboard", "Mouse"]);

        let grid = controller.set_sort_field(SortField::Rating).await.unwrap();
        assert_eq!(titles(grid), vec!["Mouse", "Keyboard", "Monitor"]);

        assert_eq!(MockApi::calls(&api.items_calls), 3);
    }

    #[tokio::test]
    async fn test_min_rating_sent_to_server() {
        let api = Arc::new(MockApi::new());
        let mut controller = mount(&api, CatalogControls::default());

        assert_ok!(controller.set_min_rating(Some(4.5)).await);

        let query = api.last_query.lock().unwrap().unwrap();
        assert_eq!(query.min_rating, Some(4.5));
        assert_eq!(controller.controls().min_rating, Some(4.5));
    }

    #[tokio::test]
    async fn test_new_fetch_replaces_grid() {
        let api = Arc::new(MockApi::new());
        api.set_items(Some(sample_items()));
        let mut controller = mount(&api, CatalogControls::default());
        controller.refresh().await.unwrap();
        assert_eq!(controller.view().len(), 3);

        api.set_items(Some(vec![make_item("Only", "$1", "5 stars", 1)]));
        controller.refresh().await.unwrap();
        assert_eq!(titles(controller.view()), vec!["Only"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_returned_and_keeps_grid() {
        let api = Arc::new(MockApi::new());
        api.set_items(Some(sample_items()));
        let mut controller = mount(&api, CatalogControls::default());
        controller.refresh().await.unwrap();

        api.set_items(None);
        let err = assert_err!(controller.refresh().await);
        assert_eq!(err.status(), Some(500));
        assert_eq!(controller.view().len(), 3);
    }

    #[test]
    fn test_render_applies_controls() {
        let api = Arc::new(MockApi::new());
        let controls = CatalogControls {
            sort_field: SortField::Price,
            sort_order: SortOrder::Desc,
            ..CatalogControls::default()
        };
        let mut controller = mount(&api, controls);

        let grid = controller.render(sample_items());
        assert_eq!(titles(grid), vec!["Monitor", "Keyboard", "Mouse"]);
        assert_eq!(MockApi::calls(&api.items_calls), 0);
    }
}
