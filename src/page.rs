//! Host page the controllers mount onto.

use std::collections::HashSet;

pub const PRODUCTS_CONTAINER: &str = "productsContainer";
pub const SORT_SELECT: &str = "sortSelect";
pub const SORT_ORDER_SELECT: &str = "sortOrderSelect";
pub const MIN_RATING_SELECT: &str = "minRatingSelect";
pub const REFRESH_BUTTON: &str = "refreshBtn";

pub const CATEGORY_SELECT: &str = "categorySelect";
pub const BESTSELLERS_CONTAINER: &str = "bestsellersContainer";
pub const MANUAL_REFRESH_BUTTON: &str = "manualRefreshBtn";
pub const LAST_UPDATED_TEXT: &str = "lastUpdatedText";
pub const CONFIRMATION_MODAL: &str = "confirmationModal";
pub const LOADER_OVERLAY: &str = "loaderOverlay";
pub const CONFIRM_REFRESH_BUTTON: &str = "confirmRefreshBtn";
pub const CANCEL_REFRESH_BUTTON: &str = "cancelRefreshBtn";

/// Every element id the dashboard knows about.
pub const ALL_ELEMENTS: &[&str] = &[
    PRODUCTS_CONTAINER,
    SORT_SELECT,
    SORT_ORDER_SELECT,
    MIN_RATING_SELECT,
    REFRESH_BUTTON,
    CATEGORY_SELECT,
    BESTSELLERS_CONTAINER,
    MANUAL_REFRESH_BUTTON,
    LAST_UPDATED_TEXT,
    CONFIRMATION_MODAL,
    LOADER_OVERLAY,
    CONFIRM_REFRESH_BUTTON,
    CANCEL_REFRESH_BUTTON,
];

/// Elements the bestsellers section cannot run without.
pub const BESTSELLERS_REQUIRED: &[&str] =
    &[CATEGORY_SELECT, MANUAL_REFRESH_BUTTON, CONFIRMATION_MODAL, LOADER_OVERLAY];

/// A page exposing named elements.
pub trait HostPage {
    fn has_element(&self, id: &str) -> bool;

    /// Returns the first id in `ids` the page does not have.
    fn first_missing(&self, ids: &[&'static str]) -> Option<&'static str> {
        ids.iter().copied().find(|id| !self.has_element(id))
    }
}

/// Page described by a fixed set of element ids.
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    elements: HashSet<String>,
}

impl StaticPage {
    /// A page with no elements.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A page carrying every dashboard element.
    pub fn full() -> Self {
        Self::with_elements(ALL_ELEMENTS.iter().copied())
    }

    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { elements: ids.into_iter().map(Into::into).collect() }
    }

    /// Removes an element, returning the page for chaining.
    pub fn without(mut self, id: &str) -> Self {
        self.elements.remove(id);
        self
    }
}

impl HostPage for StaticPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains(id)
    }
}
