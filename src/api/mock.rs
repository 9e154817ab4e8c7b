//! In-memory backend used by controller tests.

use super::client::{DashboardApi, ItemsQuery};
use super::error::{ApiError, ApiResult};
use super::models::{BestsellerCatalog, Item, ParserStatus, TriggerResponse};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Canned responses; `None`/`Err` entries answer with an HTTP error.
pub(crate) struct MockApi {
    pub items: Mutex<Option<Vec<Item>>>,
    pub catalog: Mutex<Option<BestsellerCatalog>>,
    pub status: Mutex<Option<ParserStatus>>,
    pub trigger: Mutex<Result<TriggerResponse, (u16, Option<String>)>>,
    pub last_query: Mutex<Option<ItemsQuery>>,
    pub items_calls: AtomicU32,
    pub catalog_calls: AtomicU32,
    pub status_calls: AtomicU32,
    pub trigger_calls: AtomicU32,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Some(Vec::new())),
            catalog: Mutex::new(Some(BestsellerCatalog::new())),
            status: Mutex::new(Some(ParserStatus::default())),
            trigger: Mutex::new(Ok(TriggerResponse {
                status: Some("success".to_string()),
                message: "Parser finished.".to_string(),
            })),
            last_query: Mutex::new(None),
            items_calls: AtomicU32::new(0),
            catalog_calls: AtomicU32::new(0),
            status_calls: AtomicU32::new(0),
            trigger_calls: AtomicU32::new(0),
        }
    }

    pub fn set_items(&self, items: Option<Vec<Item>>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn set_catalog(&self, catalog: Option<BestsellerCatalog>) {
        *self.catalog.lock().unwrap() = catalog;
    }

    pub fn set_status(&self, status: Option<ParserStatus>) {
        *self.status.lock().unwrap() = status;
    }

    pub fn fail_trigger(&self, status: u16, detail: Option<&str>) {
        *self.trigger.lock().unwrap() = Err((status, detail.map(String::from)));
    }

    pub fn calls(counter: &AtomicU32) -> u32 {
        counter.load(Ordering::SeqCst)
    }

    fn server_error() -> ApiError {
        ApiError::Status { status: 500, detail: None }
    }
}

#[async_trait]
impl DashboardApi for MockApi {
    async fn items(&self, query: &ItemsQuery) -> ApiResult<Vec<Item>> {
        self.items_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(*query);
        self.items.lock().unwrap().clone().ok_or_else(Self::server_error)
    }

    async fn bestsellers(&self) -> ApiResult<BestsellerCatalog> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        self.catalog.lock().unwrap().clone().ok_or_else(Self::server_error)
    }

    async fn parser_status(&self) -> ApiResult<ParserStatus> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status.lock().unwrap().clone().ok_or_else(Self::server_error)
    }

    async fn trigger_parser(&self) -> ApiResult<TriggerResponse> {
        self.trigger_calls.fetch_add(1, Ordering::SeqCst);
        self.trigger
            .lock()
            .unwrap()
            .clone()
            .map_err(|(status, detail)| ApiError::Status { status, detail })
    }
}
