//! # List Cycler
//!
//! Groups several [`FilterableList`]s behind a single viewport. Exactly one
//! list is active at a time; Tab and Shift-Tab rotate through them with
//! wrap-around. Input and queries go to the active list only, while every
//! list keeps its own selection and filter.

use std::fmt;

use crate::tui::component::EventHandler;
use crate::tui::components::item_list::{FilterableList, ListEntry, ListEvent};
use crate::tui::event::TuiEvent;

/// A cycler must manage at least one list; an empty group has no active
/// list to route input to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyCycler;

impl fmt::Display for EmptyCycler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot build a cycler over zero lists")
    }
}

impl std::error::Error for EmptyCycler {}

#[derive(Debug)]
pub struct ListCycler<T> {
    lists: Vec<FilterableList<T>>,
    active: usize,
}

impl<T: ListEntry> ListCycler<T> {
    pub fn new(lists: Vec<FilterableList<T>>) -> Result<Self, EmptyCycler> {
        if lists.is_empty() {
            return Err(EmptyCycler);
        }
        Ok(Self { lists, active: 0 })
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_list(&self) -> &FilterableList<T> {
        &self.lists[self.active]
    }

    pub fn active_list_mut(&mut self) -> &mut FilterableList<T> {
        &mut self.lists[self.active]
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.lists.iter().map(|l| l.title())
    }

    /// Advance to the next list, wrapping past the end.
    pub fn cycle_next(&mut self) {
        self.active = (self.active + 1) % self.lists.len();
    }

    /// Go back to the previous list, wrapping past the start.
    pub fn cycle_prev(&mut self) {
        self.active = (self.active + self.lists.len() - 1) % self.lists.len();
    }

    /// Resize every list in the group, active or not.
    pub fn resize(&mut self, width: u16, height: u16) {
        for list in &mut self.lists {
            list.resize(width, height);
        }
    }

    /// True while the active list is in filter entry.
    pub fn setting_filter(&self) -> bool {
        self.active_list().setting_filter()
    }

    /// True when the active list has an applied filter.
    pub fn is_filtered(&self) -> bool {
        self.active_list().is_filtered()
    }

    /// The highlighted entry of the active list, if any.
    pub fn selected_item(&self) -> Option<&T> {
        self.active_list().selected()
    }

    /// Forward an event to the active list only.
    pub fn dispatch(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        self.active_list_mut().handle_event(event)
    }
}
