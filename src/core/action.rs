//! # Actions
//!
//! Everything that can happen in a session becomes an `Action`: the form is
//! submitted, the fetch task reports back, a navigation key is pressed.
//!
//! The `update()` function takes the current state and an action and
//! mutates the state, returning the side effect the caller must perform.
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This keeps every page transition testable without a terminal or an HTTP
//! server.

use log::debug;

use crate::api::client::FetchError;
use crate::api::types::{Contest, PollingPlace, VoterInfoResponse};
use crate::core::address::InputAddress;
use crate::core::state::{App, Screen};

#[derive(Debug)]
pub enum Action {
    /// The address form completed with these values.
    SubmitAddress(InputAddress),
    /// The address form was cancelled.
    AbortInput,
    /// The fetch task finished successfully.
    FetchSucceeded(Box<VoterInfoResponse>),
    /// The fetch task failed.
    FetchFailed(FetchError),
    /// Any key pressed on the error screen.
    DismissError,
    /// Menu shortcuts. Ignored until election data exists.
    ShowVote,
    ShowContests,
    ShowRegister,
    /// Enter on a highlighted polling place.
    SelectPollingPlace(Box<PollingPlace>),
    /// Enter on a highlighted contest.
    SelectContest(Box<Contest>),
    /// Escape from a detail page.
    Back,
    /// Terminal resized. Never changes the screen.
    Resize(u16, u16),
    Quit,
}

/// Side effects `update()` asks the caller to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn the voter-info fetch for this address.
    Fetch(InputAddress),
    /// Election data just landed; (re)build the list widgets.
    ListsReady,
    /// Tear down the session.
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitAddress(address) => {
            if app.screen != Screen::AddressInput || address.is_empty() {
                return Effect::None;
            }
            app.address = address.clone();
            app.screen = Screen::Loading;
            Effect::Fetch(address)
        }
        Action::AbortInput => Effect::Quit,
        Action::FetchSucceeded(data) => {
            if app.screen != Screen::Loading {
                // The user already left the loading page (or the session is
                // winding down); a stale result must not resurface.
                debug!("discarding fetch result outside the loading page");
                return Effect::None;
            }
            app.election = Some(*data);
            app.error = None;
            app.screen = Screen::VotingOptions;
            Effect::ListsReady
        }
        Action::FetchFailed(err) => {
            if app.screen != Screen::Loading {
                debug!("discarding fetch error outside the loading page: {err}");
                return Effect::None;
            }
            app.error = Some(err);
            app.screen = Screen::ErrorRetry;
            Effect::None
        }
        Action::DismissError => {
            if app.screen == Screen::ErrorRetry {
                app.error = None;
                app.screen = Screen::AddressInput;
            }
            Effect::None
        }
        Action::ShowVote => {
            if app.has_menu() {
                app.screen = Screen::VotingOptions;
            }
            Effect::None
        }
        Action::ShowContests => {
            if app.has_menu() {
                app.screen = Screen::ContestList;
            }
            Effect::None
        }
        Action::ShowRegister => {
            if app.has_menu() {
                app.screen = Screen::Registration;
            }
            Effect::None
        }
        Action::SelectPollingPlace(place) => {
            if app.screen == Screen::VotingOptions {
                app.selected_place = Some(*place);
                app.screen = Screen::PollingPlaceDetail;
            }
            Effect::None
        }
        Action::SelectContest(contest) => {
            if app.screen == Screen::ContestList {
                app.selected_contest = Some(*contest);
                app.screen = Screen::ContestDetail;
            }
            Effect::None
        }
        Action::Back => {
            match app.screen {
                Screen::PollingPlaceDetail => app.screen = Screen::VotingOptions,
                Screen::ContestDetail => app.screen = Screen::ContestList,
                _ => {}
            }
            Effect::None
        }
        Action::Resize(width, height) => {
            app.width = width;
            app.height = height;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
