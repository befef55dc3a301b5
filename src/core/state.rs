//! # Session State
//!
//! Core state for one connected user. This module contains domain data
//! only - no terminal types. Presentation state (the form, the lists)
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── screen: Screen                       // which page is showing
//! ├── address: InputAddress                // last submitted address
//! ├── election: Option<VoterInfoResponse>  // set after a successful fetch
//! ├── error: Option<FetchError>            // set while on ErrorRetry
//! ├── selected_place: Option<PollingPlace> // detail-page selection
//! ├── selected_contest: Option<Contest>    // detail-page selection
//! └── width, height                        // viewport dimensions
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::client::FetchError;
use crate::api::types::{Contest, PollingPlace, VoterInfoResponse};
use crate::core::address::InputAddress;

/// The current page. Exactly one is active; transitions happen only inside
/// `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    AddressInput,
    Loading,
    ErrorRetry,
    VotingOptions,
    ContestList,
    ContestDetail,
    PollingPlaceDetail,
    Registration,
}

pub struct App {
    pub screen: Screen,
    pub address: InputAddress,
    pub election: Option<VoterInfoResponse>,
    pub error: Option<FetchError>,
    pub selected_place: Option<PollingPlace>,
    pub selected_contest: Option<Contest>,
    pub width: u16,
    pub height: u16,
}

impl App {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            screen: Screen::AddressInput,
            address: InputAddress::default(),
            election: None,
            error: None,
            selected_place: None,
            selected_contest: None,
            width,
            height,
        }
    }

    /// Whether the tab menu (and its single-letter shortcuts) is live.
    /// True from the first successful fetch onward.
    pub fn has_menu(&self) -> bool {
        self.election.is_some()
    }
}
