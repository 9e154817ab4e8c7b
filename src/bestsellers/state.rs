//! Confirmation workflow of the manual scraper refresh.

use serde::Serialize;

/// Where the manual refresh currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshState {
    #[default]
    Idle,
    /// Confirmation modal is showing
    ModalOpen,
    /// Trigger request in flight, loader overlay is showing
    Loading,
}

/// User or network events that drive [`RefreshState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshEvent {
    RefreshClicked,
    Cancelled,
    Confirmed,
    /// Trigger request finished, successfully or not
    Settled,
}

impl RefreshState {
    /// Next state for `event`, or `None` when the event does not apply here.
    pub fn next(self, event: RefreshEvent) -> Option<RefreshState> {
        match (self, event) {
            (RefreshState::Idle, RefreshEvent::RefreshClicked) => Some(RefreshState::ModalOpen),
            (RefreshState::ModalOpen, RefreshEvent::Cancelled) => Some(RefreshState::Idle),
            (RefreshState::ModalOpen, RefreshEvent::Confirmed) => Some(RefreshState::Loading),
            (RefreshState::Loading, RefreshEvent::Settled) => Some(RefreshState::Idle),
            _ => None,
        }
    }

    pub fn modal_visible(self) -> bool {
        self == RefreshState::ModalOpen
    }

    pub fn loader_visible(self) -> bool {
        self == RefreshState::Loading
    }
}
