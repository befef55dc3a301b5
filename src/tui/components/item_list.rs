//! # Filterable List
//!
//! A scrollable list widget with an incremental text filter. Each list owns
//! its selection, its filter text, and its dimensions independently, so
//! several lists can share one viewport through the cycler without
//! clobbering each other.
//!
//! Filter lifecycle: `/` starts filter entry (keystrokes build the query
//! live), Enter applies it, Esc clears it. While entering, every printable
//! key belongs to the query - page shortcuts are suppressed upstream.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::types::{Contest, PollingPlace};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Capability shared by everything that can appear in a [`FilterableList`]:
/// a title row, a dimmer subtitle row, and the text the filter matches on.
pub trait ListEntry {
    fn title(&self) -> String;
    fn subtitle(&self) -> String;
    fn filter_key(&self) -> String;
}

impl ListEntry for PollingPlace {
    fn title(&self) -> String {
        self.display_name()
    }

    fn subtitle(&self) -> String {
        self.address.display()
    }

    fn filter_key(&self) -> String {
        self.display_name()
    }
}

impl ListEntry for Contest {
    fn title(&self) -> String {
        self.display_title()
    }

    fn subtitle(&self) -> String {
        if !self.office.is_empty() {
            self.office.clone()
        } else {
            self.contest_type.clone()
        }
    }

    fn filter_key(&self) -> String {
        if !self.ballot_title.is_empty() {
            self.ballot_title.clone()
        } else {
            self.office.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// No filter; all items visible.
    Unfiltered,
    /// The user is typing a query; keystrokes narrow the list live.
    Editing,
    /// A query is applied; navigation keys work again.
    Applied,
}

/// Emitted when a key changed the filter lifecycle, in case the caller
/// wants to react. Plain navigation returns nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    FilterStarted,
    FilterApplied,
    FilterCleared,
}

#[derive(Debug)]
pub struct FilterableList<T> {
    title: String,
    items: Vec<T>,
    /// Indices into `items` that match the current filter, in order.
    visible: Vec<usize>,
    state: ListState,
    filter: String,
    filter_state: FilterState,
    width: u16,
    height: u16,
}

impl<T: ListEntry> FilterableList<T> {
    pub fn new(items: Vec<T>, title: impl Into<String>, width: u16, height: u16) -> Self {
        let visible: Vec<usize> = (0..items.len()).collect();
        let mut state = ListState::default();
        if !visible.is_empty() {
            state.select(Some(0));
        }
        Self {
            title: title.into(),
            items,
            visible,
            state,
            filter: String::new(),
            filter_state: FilterState::Unfiltered,
            width,
            height,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// True while the user is typing a filter query.
    pub fn setting_filter(&self) -> bool {
        self.filter_state == FilterState::Editing
    }

    /// True when a filter query has been applied.
    pub fn is_filtered(&self) -> bool {
        self.filter_state == FilterState::Applied
    }

    pub fn filter_text(&self) -> &str {
        &self.filter
    }

    /// The highlighted entry, or None when the (filtered) list is empty.
    pub fn selected(&self) -> Option<&T> {
        let index = self.state.selected()?;
        let item_index = *self.visible.get(index)?;
        self.items.get(item_index)
    }

    fn refilter(&mut self) {
        let needle = self.filter.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                needle.is_empty() || item.filter_key().to_lowercase().contains(&needle)
            })
            .map(|(ix, _)| ix)
            .collect();
        self.state
            .select(if self.visible.is_empty() { None } else { Some(0) });
    }

    fn move_up(&mut self) {
        if let Some(selected) = self.state.selected() {
            self.state.select(Some(selected.saturating_sub(1)));
        }
    }

    fn move_down(&mut self) {
        if let Some(selected) = self.state.selected() {
            let last = self.visible.len().saturating_sub(1);
            self.state.select(Some((selected + 1).min(last)));
        }
    }
}

impl<T: ListEntry> EventHandler for FilterableList<T> {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        if self.filter_state == FilterState::Editing {
            return match event {
                TuiEvent::Char(c) => {
                    self.filter.push(*c);
                    self.refilter();
                    None
                }
                TuiEvent::Backspace => {
                    self.filter.pop();
                    self.refilter();
                    None
                }
                TuiEvent::Enter => {
                    if self.filter.is_empty() {
                        self.filter_state = FilterState::Unfiltered;
                        None
                    } else {
                        self.filter_state = FilterState::Applied;
                        Some(ListEvent::FilterApplied)
                    }
                }
                TuiEvent::Esc => {
                    self.filter.clear();
                    self.filter_state = FilterState::Unfiltered;
                    self.refilter();
                    Some(ListEvent::FilterCleared)
                }
                _ => None,
            };
        }

        match event {
            TuiEvent::Char('/') => {
                self.filter.clear();
                self.filter_state = FilterState::Editing;
                self.refilter();
                Some(ListEvent::FilterStarted)
            }
            TuiEvent::Up | TuiEvent::Char('k') => {
                self.move_up();
                None
            }
            TuiEvent::Down | TuiEvent::Char('j') => {
                self.move_down();
                None
            }
            TuiEvent::Esc if self.filter_state == FilterState::Applied => {
                self.filter.clear();
                self.filter_state = FilterState::Unfiltered;
                self.refilter();
                Some(ListEvent::FilterCleared)
            }
            _ => None,
        }
    }
}

impl<T: ListEntry> Component for FilterableList<T> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(4) as usize;

        let status_line = match self.filter_state {
            FilterState::Editing => Line::from(vec![
                Span::styled(" /", Style::default().fg(Color::Magenta)),
                Span::raw(self.filter.clone()),
                Span::styled("▌ ", Style::default().fg(Color::Magenta)),
            ]),
            FilterState::Applied => Line::from(Span::styled(
                format!(" “{}” {}/{} ", self.filter, self.visible.len(), self.items.len()),
                Style::default().fg(Color::DarkGray),
            )),
            FilterState::Unfiltered => Line::from(Span::styled(
                " ↑/↓ move  / filter  enter select ",
                Style::default().fg(Color::DarkGray),
            )),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
            .title_bottom(status_line)
            .padding(Padding::horizontal(1));

        if self.visible.is_empty() {
            let empty = List::new([ListItem::new(Span::styled(
                "Nothing to show.",
                Style::default().fg(Color::DarkGray),
            ))])
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .filter_map(|&ix| self.items.get(ix))
            .map(|item| {
                let title = truncate_to_width(&item.title(), inner_width);
                let subtitle = truncate_to_width(&item.subtitle(), inner_width);
                ListItem::new(Text::from(vec![
                    Line::from(Span::styled(title, Style::default().fg(Color::White))),
                    Line::from(Span::styled(subtitle, Style::default().fg(Color::DarkGray))),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("┃ ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}

/// Truncate a string to at most `max` display columns, ending with an
/// ellipsis when cut.
fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let budget = max.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Address;

    fn place(name: &str, city: &str) -> PollingPlace {
        PollingPlace {
            name: name.into(),
            address: Address {
                city: city.into(),
                ..Address::default()
            },
            ..PollingPlace::default()
        }
    }

    fn sample_list() -> FilterableList<PollingPlace> {
        FilterableList::new(
            vec![
                place("City Hall", "Richmond"),
                place("Main Library", "Richmond"),
                place("Community Center", "Henrico"),
            ],
            "Polling Locations",
            80,
            20,
        )
    }

    #[test]
    fn initial_selection_is_first_item() {
        let list = sample_list();
        assert_eq!(list.selected().unwrap().name, "City Hall");
    }

    #[test]
    fn empty_list_has_no_selection() {
        let list: FilterableList<PollingPlace> = FilterableList::new(vec![], "Empty", 80, 20);
        assert!(list.selected().is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn navigation_moves_and_clamps() {
        let mut list = sample_list();
        list.handle_event(&TuiEvent::Down);
        assert_eq!(list.selected().unwrap().name, "Main Library");
        list.handle_event(&TuiEvent::Down);
        list.handle_event(&TuiEvent::Down);
        assert_eq!(list.selected().unwrap().name, "Community Center");
        list.handle_event(&TuiEvent::Up);
        list.handle_event(&TuiEvent::Up);
        list.handle_event(&TuiEvent::Up);
        assert_eq!(list.selected().unwrap().name, "City Hall");
    }

    #[test]
    fn slash_enters_filter_entry_and_narrows_live() {
        let mut list = sample_list();
        assert_eq!(
            list.handle_event(&TuiEvent::Char('/')),
            Some(ListEvent::FilterStarted)
        );
        assert!(list.setting_filter());
        assert!(!list.is_filtered());

        for c in "library".chars() {
            list.handle_event(&TuiEvent::Char(c));
        }
        assert_eq!(list.selected().unwrap().name, "Main Library");

        assert_eq!(
            list.handle_event(&TuiEvent::Enter),
            Some(ListEvent::FilterApplied)
        );
        assert!(!list.setting_filter());
        assert!(list.is_filtered());
    }

    #[test]
    fn esc_clears_the_filter() {
        let mut list = sample_list();
        list.handle_event(&TuiEvent::Char('/'));
        list.handle_event(&TuiEvent::Char('x'));
        assert!(list.selected().is_none());

        assert_eq!(
            list.handle_event(&TuiEvent::Esc),
            Some(ListEvent::FilterCleared)
        );
        assert!(!list.setting_filter());
        assert_eq!(list.selected().unwrap().name, "City Hall");
    }

    #[test]
    fn applying_an_empty_filter_returns_to_unfiltered() {
        let mut list = sample_list();
        list.handle_event(&TuiEvent::Char('/'));
        assert_eq!(list.handle_event(&TuiEvent::Enter), None);
        assert!(!list.setting_filter());
        assert!(!list.is_filtered());
    }

    #[test]
    fn backspace_widens_the_match_again() {
        let mut list = sample_list();
        list.handle_event(&TuiEvent::Char('/'));
        list.handle_event(&TuiEvent::Char('c'));
        list.handle_event(&TuiEvent::Char('z'));
        assert!(list.selected().is_none());
        list.handle_event(&TuiEvent::Backspace);
        // "c" matches City Hall and Community Center.
        assert_eq!(list.selected().unwrap().name, "City Hall");
    }

    #[test]
    fn resize_updates_reported_dimensions() {
        let mut list = sample_list();
        list.resize(120, 40);
        assert_eq!((list.width(), list.height()), (120, 40));
    }

    #[test]
    fn truncate_to_width_cuts_with_ellipsis() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer string", 8), "a longe…");
    }
}
