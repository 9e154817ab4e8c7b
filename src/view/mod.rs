//! Declarative view descriptions produced by the controllers.
//!
//! Views hold plain text; escaping for a given output format happens in
//! [`crate::format`].

use crate::api::{BestsellerItem, Item};
use serde::Serialize;

const NOT_AVAILABLE: &str = "N/A";
const LINK_LABEL: &str = "View on Amazon";

/// Product image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub src: Option<String>,
    pub alt: String,
}

/// Outbound link, opened in a new window by graphical hosts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub href: Option<String>,
    pub label: String,
}

/// A product card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    /// Rank badge shown on bestseller cards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub image: Image,
    pub title: String,
    pub price: String,
    pub rating: String,
    /// Footer line ("Rank: 3", "Reviews: 120")
    pub meta: String,
    pub link: Link,
}

/// Grid of cards; rendering a new grid replaces the old one entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardGrid {
    pub cards: Vec<Card>,
}

impl CardGrid {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// One entry of a selector. An empty `value` marks a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self { value: String::new(), label: label.into() }
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// Drop-down selector state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectView {
    pub options: Vec<SelectOption>,
    /// Value of the selected option; empty when the placeholder is selected
    pub selected: String,
}

impl SelectView {
    /// Options a user can actually pick.
    pub fn selectable(&self) -> impl Iterator<Item = &SelectOption> {
        self.options.iter().filter(|o| !o.is_placeholder())
    }

    /// Label of the leading placeholder option, if any.
    pub fn placeholder_label(&self) -> Option<&str> {
        self.options.iter().find(|o| o.is_placeholder()).map(|o| o.label.as_str())
    }
}

/// Last-updated line of the bestsellers section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "timestamp", rename_all = "snake_case")]
pub enum StatusText {
    /// Nothing fetched yet
    #[default]
    Pending,
    /// Snapshot exists and was written at the given time
    Updated(String),
    /// Backend has no snapshot yet
    NotGenerated,
    /// Status request failed
    Unavailable,
}

impl StatusText {
    pub fn text(&self) -> String {
        match self {
            StatusText::Pending => "Checking update status...".to_string(),
            StatusText::Updated(ts) => format!("Last updated: {}", ts),
            StatusText::NotGenerated => "Data has not been generated yet. Please refresh.".to_string(),
            StatusText::Unavailable => "Could not get update status.".to_string(),
        }
    }
}

impl std::fmt::Display for StatusText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}

/// Snapshot of everything the bestsellers section displays.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BestsellersView {
    pub status: StatusText,
    pub selector: SelectView,
    pub grid: CardGrid,
    pub modal_visible: bool,
    pub loader_visible: bool,
    /// Alerts raised since the host last drained them
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn or_na(value: Option<&str>) -> String {
    non_empty(value).unwrap_or(NOT_AVAILABLE).to_string()
}

/// Card for a catalog item.
pub fn catalog_card(item: &Item) -> Card {
    Card {
        badge: None,
        image: Image { src: item.main_image_url.clone(), alt: item.title.clone() },
        title: item.title.clone(),
        price: or_na(item.price.as_deref()),
        rating: or_na(item.rating.as_deref()),
        meta: format!("Rank: {}", item.rank),
        link: Link { href: item.url.clone(), label: LINK_LABEL.to_string() },
    }
}

/// Card for a bestseller entry.
pub fn bestseller_card(item: &BestsellerItem) -> Card {
    let title = item.title.clone().unwrap_or_default();

    Card {
        badge: Some(non_empty(item.rank.as_deref()).unwrap_or("#?").to_string()),
        image: Image { src: item.image_url.clone(), alt: title.clone() },
        title: non_empty(Some(title.as_str())).unwrap_or("No title").to_string(),
        price: or_na(item.price.as_deref()),
        rating: or_na(item.rating.as_deref()),
        meta: format!("Reviews: {}", non_empty(item.reviews_count.as_deref()).unwrap_or("0")),
        link: Link { href: item.url.clone(), label: LINK_LABEL.to_string() },
    }
}

/// Grid for a list of catalog items, in the given order.
pub fn catalog_grid(items: &[Item]) -> CardGrid {
    CardGrid::new(items.iter().map(catalog_card).collect())
}

/// Grid for a bestseller category.
pub fn bestseller_grid(items: &[BestsellerItem]) -> CardGrid {
    CardGrid::new(items.iter().map(bestseller_card).collect())
}
