//! # Terminal Session
//!
//! Owns the terminal, the event loop, and the presentation state. Events
//! become `Action`s, `update()` returns `Effect`s, and effects are
//! performed here: spawning the fetch task, building the list widgets,
//! quitting.
//!
//! The fetch task runs on tokio and reports back over an mpsc channel. Its
//! abort handle is kept so a fetch left in flight at shutdown is torn down
//! instead of left dangling.

pub mod component;
pub mod components;
pub mod event;
pub mod ui;

use std::sync::mpsc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::AbortHandle;

use crate::api::client::CivicClient;
use crate::core::action::{Action, Effect, update};
use crate::core::address::InputAddress;
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Screen};
use crate::tui::component::EventHandler;
use crate::tui::components::{AddressForm, FilterableList, FormEvent, ListCycler};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::{SPINNER_FRAMES, draw_ui};

pub const HEADER_HEIGHT: u16 = 3;

/// How long to block for input when the spinner is animating vs. idle.
const ANIMATING_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Presentation state: widgets with selection, filter, and focus. Kept out
/// of `App` so the reducer stays free of terminal types.
pub struct TuiState {
    pub form: AddressForm,
    pub cycler: Option<ListCycler<crate::api::types::PollingPlace>>,
    pub contests: Option<FilterableList<crate::api::types::Contest>>,
}

impl TuiState {
    fn new() -> Self {
        Self {
            form: AddressForm::new(),
            cycler: None,
            contests: None,
        }
    }

    /// True while any visible widget is capturing keystrokes for a filter
    /// query. Menu shortcuts must stay dead during filter entry.
    fn setting_filter(&self, screen: Screen) -> bool {
        match screen {
            Screen::VotingOptions => self.cycler.as_ref().is_some_and(|c| c.setting_filter()),
            Screen::ContestList => self.contests.as_ref().is_some_and(|l| l.setting_filter()),
            _ => false,
        }
    }
}

/// Runs the session to completion: draw, poll, dispatch, repeat.
pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = CivicClient::new(
        config.api_key.clone(),
        Some(config.base_url.clone()),
        config.timeout,
    );

    let mut terminal = ratatui::init();
    let size = terminal.size()?;
    let mut app = App::new(size.width, size.height);
    let mut tui = TuiState::new();

    let (tx, rx) = mpsc::channel::<Action>();
    let mut fetch: Option<AbortHandle> = None;

    let mut needs_redraw = true;
    let mut spinner_frame = 0usize;

    info!("session started at {}x{}", size.width, size.height);

    'main: loop {
        let animating = app.screen == Screen::Loading;
        if animating {
            spinner_frame = (spinner_frame + 1) % SPINNER_FRAMES.len();
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|frame| draw_ui(frame, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Block for the first event, then drain whatever else queued up so
        // fast typing doesn't cost a draw per keystroke.
        let timeout = if animating { ANIMATING_POLL } else { IDLE_POLL };
        let mut next = poll_event_timeout(timeout);
        while let Some(ev) = next {
            needs_redraw = true;
            let effect = handle_event(&mut app, &mut tui, ev);
            if perform(&client, &tx, &mut fetch, &mut app, &mut tui, effect) {
                break 'main;
            }
            next = poll_event_immediate();
        }

        // Results from the fetch task arrive as actions.
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            let effect = update(&mut app, action);
            if perform(&client, &tx, &mut fetch, &mut app, &mut tui, effect) {
                break 'main;
            }
        }
    }

    if let Some(handle) = fetch.take() {
        handle.abort();
    }
    ratatui::restore();
    info!("session ended");
    Ok(())
}

/// Perform one effect. Returns true when the session should end.
fn perform(
    client: &CivicClient,
    tx: &mpsc::Sender<Action>,
    fetch: &mut Option<AbortHandle>,
    app: &mut App,
    tui: &mut TuiState,
    effect: Effect,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Fetch(address) => {
            if let Some(previous) = fetch.take() {
                previous.abort();
            }
            *fetch = Some(spawn_fetch(client, address, tx.clone()));
            false
        }
        Effect::ListsReady => {
            build_lists(app, tui);
            false
        }
        Effect::Quit => true,
    }
}

/// Translate a terminal event into an action for the current page, letting
/// the focused widget see it first.
fn handle_event(app: &mut App, tui: &mut TuiState, ev: TuiEvent) -> Effect {
    if ev == TuiEvent::ForceQuit {
        return update(app, Action::Quit);
    }
    if let TuiEvent::Resize(width, height) = ev {
        let list_height = height.saturating_sub(HEADER_HEIGHT + 1);
        if let Some(cycler) = tui.cycler.as_mut() {
            cycler.resize(width, list_height);
        }
        if let Some(contests) = tui.contests.as_mut() {
            contests.resize(width, list_height);
        }
        return update(app, Action::Resize(width, height));
    }

    // Single-letter menu shortcuts, live on the browse pages once data
    // exists, but never while a filter query is being typed. The form,
    // the loading page, and the error page keep their own key handling.
    let browse_page = matches!(
        app.screen,
        Screen::VotingOptions
            | Screen::ContestList
            | Screen::ContestDetail
            | Screen::PollingPlaceDetail
            | Screen::Registration
    );
    if app.has_menu()
        && browse_page
        && !tui.setting_filter(app.screen)
        && let TuiEvent::Char(c) = ev
        && let Some(action) = components::header::menu_action(c)
    {
        return update(app, action);
    }

    match app.screen {
        Screen::AddressInput => match tui.form.handle_event(&ev) {
            Some(FormEvent::Submit(address)) => update(app, Action::SubmitAddress(address)),
            Some(FormEvent::Abort) => update(app, Action::AbortInput),
            None => Effect::None,
        },
        Screen::Loading => Effect::None,
        Screen::ErrorRetry => {
            // Any key dismisses; the form starts fresh.
            tui.form.reset();
            update(app, Action::DismissError)
        }
        Screen::VotingOptions => {
            let Some(cycler) = tui.cycler.as_mut() else {
                return Effect::None;
            };
            match ev {
                TuiEvent::Tab if !cycler.setting_filter() => {
                    cycler.cycle_next();
                    Effect::None
                }
                TuiEvent::BackTab if !cycler.setting_filter() => {
                    cycler.cycle_prev();
                    Effect::None
                }
                TuiEvent::Enter if !cycler.setting_filter() => {
                    match cycler.selected_item().cloned() {
                        Some(place) => {
                            update(app, Action::SelectPollingPlace(Box::new(place)))
                        }
                        None => Effect::None,
                    }
                }
                _ => {
                    cycler.dispatch(&ev);
                    Effect::None
                }
            }
        }
        Screen::ContestList => {
            let Some(contests) = tui.contests.as_mut() else {
                return Effect::None;
            };
            if ev == TuiEvent::Enter && !contests.setting_filter() {
                match contests.selected().cloned() {
                    Some(contest) => update(app, Action::SelectContest(Box::new(contest))),
                    None => Effect::None,
                }
            } else {
                contests.handle_event(&ev);
                Effect::None
            }
        }
        Screen::PollingPlaceDetail | Screen::ContestDetail => {
            if ev == TuiEvent::Esc {
                update(app, Action::Back)
            } else {
                Effect::None
            }
        }
        Screen::Registration => Effect::None,
    }
}

/// Kick off the voter-info fetch on the runtime. The result goes back over
/// the channel; if the receiver is already gone, the result is discarded.
fn spawn_fetch(client: &CivicClient, address: InputAddress, tx: mpsc::Sender<Action>) -> AbortHandle {
    let client = client.clone();
    let handle = tokio::spawn(async move {
        debug!("fetching voter info for {address}");
        let action = match client.voter_info(&address.to_string()).await {
            Ok(data) => Action::FetchSucceeded(Box::new(data)),
            Err(err) => Action::FetchFailed(err),
        };
        if tx.send(action).is_err() {
            warn!("fetch finished after the session ended; result discarded");
        }
    });
    handle.abort_handle()
}

/// (Re)build the list widgets from the freshly fetched election data.
fn build_lists(app: &App, tui: &mut TuiState) {
    let Some(election) = app.election.as_ref() else {
        return;
    };
    let width = app.width;
    let height = app.height.saturating_sub(HEADER_HEIGHT + 1);

    let lists = vec![
        FilterableList::new(
            election.polling_locations.clone(),
            "Polling Locations",
            width,
            height,
        ),
        FilterableList::new(
            election.early_vote_sites.clone(),
            "Early Voting Sites",
            width,
            height,
        ),
        FilterableList::new(
            election.drop_off_locations.clone(),
            "Drop Off Locations",
            width,
            height,
        ),
    ];
    match ListCycler::new(lists) {
        Ok(cycler) => tui.cycler = Some(cycler),
        Err(e) => warn!("could not build location lists: {e}"),
    }

    tui.contests = Some(FilterableList::new(
        election.contests.clone(),
        "Contests",
        width,
        height,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Address, Election, PollingPlace, VoterInfoResponse};

    fn loaded_app() -> App {
        let mut app = App::new(80, 24);
        app.election = Some(VoterInfoResponse {
            election: Election {
                election_day: "2024-11-05".into(),
                ..Election::default()
            },
            polling_locations: vec![PollingPlace {
                name: "City Hall".into(),
                address: Address::default(),
                ..PollingPlace::default()
            }],
            ..VoterInfoResponse::default()
        });
        app.screen = Screen::VotingOptions;
        app
    }

    #[test]
    fn lists_are_built_from_election_data() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        build_lists(&app, &mut tui);

        let cycler = tui.cycler.as_ref().unwrap();
        assert_eq!(cycler.len(), 3);
        assert_eq!(cycler.selected_item().unwrap().name, "City Hall");
        assert!(tui.contests.is_some());
    }

    #[test]
    fn lists_are_sized_below_the_header() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        build_lists(&app, &mut tui);
        let list = tui.cycler.as_ref().unwrap().active_list();
        assert_eq!(list.width(), 80);
        assert_eq!(list.height(), 24 - (HEADER_HEIGHT + 1));
    }

    #[test]
    fn menu_shortcut_switches_pages() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        build_lists(&app, &mut tui);

        let effect = handle_event(&mut app, &mut tui, TuiEvent::Char('c'));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.screen, Screen::ContestList);
    }

    #[test]
    fn menu_shortcuts_suppressed_during_filter_entry() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        build_lists(&app, &mut tui);

        handle_event(&mut app, &mut tui, TuiEvent::Char('/'));
        assert!(tui.setting_filter(app.screen));

        // 'c' is filter text now, not a shortcut.
        handle_event(&mut app, &mut tui, TuiEvent::Char('c'));
        assert_eq!(app.screen, Screen::VotingOptions);
        assert_eq!(
            tui.cycler.as_ref().unwrap().active_list().filter_text(),
            "c"
        );
    }

    #[test]
    fn quit_shortcut_returns_quit_effect() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        let effect = handle_event(&mut app, &mut tui, TuiEvent::Char('q'));
        assert_eq!(effect, Effect::Quit);
    }

    #[test]
    fn force_quit_works_even_while_filtering() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        build_lists(&app, &mut tui);
        handle_event(&mut app, &mut tui, TuiEvent::Char('/'));

        let effect = handle_event(&mut app, &mut tui, TuiEvent::ForceQuit);
        assert_eq!(effect, Effect::Quit);
    }

    #[test]
    fn enter_on_a_place_opens_its_detail_page() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        build_lists(&app, &mut tui);

        handle_event(&mut app, &mut tui, TuiEvent::Enter);
        assert_eq!(app.screen, Screen::PollingPlaceDetail);
        assert_eq!(app.selected_place.as_ref().unwrap().name, "City Hall");

        handle_event(&mut app, &mut tui, TuiEvent::Esc);
        assert_eq!(app.screen, Screen::VotingOptions);
    }

    #[test]
    fn resize_propagates_to_every_list() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        build_lists(&app, &mut tui);

        handle_event(&mut app, &mut tui, TuiEvent::Resize(120, 40));
        assert_eq!((app.width, app.height), (120, 40));
        let cycler = tui.cycler.as_ref().unwrap();
        assert_eq!(cycler.active_list().width(), 120);
        assert_eq!(cycler.active_list().height(), 40 - (HEADER_HEIGHT + 1));
        let contests = tui.contests.as_ref().unwrap();
        assert_eq!(contests.height(), 40 - (HEADER_HEIGHT + 1));
    }

    #[test]
    fn any_key_dismisses_the_error_page() {
        let mut app = App::new(80, 24);
        app.screen = Screen::ErrorRetry;
        app.error = Some(crate::api::client::FetchError::Http { status: 503 });
        let mut tui = TuiState::new();
        tui.form.handle_event(&TuiEvent::Char('x'));

        handle_event(&mut app, &mut tui, TuiEvent::Char('z'));
        assert_eq!(app.screen, Screen::AddressInput);
        assert!(app.error.is_none());
        // The form came back empty.
        assert!(tui.form.value().is_empty());
    }
}
