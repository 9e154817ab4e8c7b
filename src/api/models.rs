//! Data models for catalog items, bestsellers and parser status.

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// A product from the static catalog (`/items`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    /// Product title
    #[serde(default)]
    pub title: String,
    /// Display price such as "$1,299.99"
    #[serde(default)]
    pub price: Option<String>,
    /// Display rating such as "4.5 out of 5 stars"
    #[serde(default)]
    pub rating: Option<String>,
    /// Position in the scraped listing
    #[serde(default)]
    pub rank: i64,
    /// Main product image
    #[serde(default)]
    pub main_image_url: Option<String>,
    /// Product page URL
    #[serde(default)]
    pub url: Option<String>,
    /// Amazon Standard Identification Number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asin: Option<String>,
    /// Price before discount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_price: Option<String>,
    /// Discount label such as "17%"
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<String>,
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_prime: Option<bool>,
}

/// Response body of `GET /items`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemsResponse {
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A product from a bestseller category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestsellerItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    /// Rank badge such as "#1"
    #[serde(default, deserialize_with = "string_or_number")]
    pub rank: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub reviews_count: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Mapping of category name to bestsellers, in server order.
///
/// Key order of the JSON object is kept so the category selector lists
/// categories the way the backend wrote them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestsellerCatalog {
    categories: IndexMap<String, Vec<BestsellerItem>>,
}

impl BestsellerCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a category, replacing an existing one in place.
    pub fn insert(&mut self, name: impl Into<String>, items: Vec<BestsellerItem>) {
        self.categories.insert(name.into(), items);
    }

    /// Category names in server order.
    pub fn names(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    /// Returns the items of a category.
    pub fn get(&self, name: &str) -> Option<&[BestsellerItem]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Response body of `GET /api/parser-status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserStatus {
    /// Modification time of the bestsellers snapshot
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Whether the backend scraper is running right now
    #[serde(default)]
    pub is_running: bool,
}

/// Response body of a successful `POST /api/trigger-parser`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Accepts `"12"`, `12` or `null` and yields a display string.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!("expected string or number, got {}", other))),
    }
}
