//! # Address Form
//!
//! Four-field text form for the postal address. Tab/Down and
//! Shift-Tab/Up move focus, Enter advances (submitting from the last
//! field), Esc cancels the whole session.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::address::InputAddress;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const FIELD_COUNT: usize = 4;

const LABELS: [&str; FIELD_COUNT] = ["Street Address", "City", "State", "Postal Code"];
const PLACEHOLDERS: [&str; FIELD_COUNT] = ["1234 W Broad St", "Richmond", "VA", "23220"];

#[derive(Debug, PartialEq, Eq)]
pub enum FormEvent {
    Submit(InputAddress),
    Abort,
}

#[derive(Default)]
pub struct AddressForm {
    fields: [String; FIELD_COUNT],
    focused: usize,
}

impl AddressForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// The address as currently typed.
    pub fn value(&self) -> InputAddress {
        InputAddress {
            street: self.fields[0].trim().to_string(),
            city: self.fields[1].trim().to_string(),
            state: self.fields[2].trim().to_string(),
            postal_code: self.fields[3].trim().to_string(),
        }
    }

    /// Clear all fields and return focus to the first one. Used when the
    /// error page bounces the user back here.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.focused = 0;
    }

    fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % FIELD_COUNT;
    }

    fn focus_prev(&mut self) {
        self.focused = (self.focused + FIELD_COUNT - 1) % FIELD_COUNT;
    }
}

impl EventHandler for AddressForm {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::Char(c) => {
                self.fields[self.focused].push(*c);
                None
            }
            TuiEvent::Backspace => {
                self.fields[self.focused].pop();
                None
            }
            TuiEvent::Tab | TuiEvent::Down => {
                self.focus_next();
                None
            }
            TuiEvent::BackTab | TuiEvent::Up => {
                self.focus_prev();
                None
            }
            TuiEvent::Enter => {
                if self.focused + 1 < FIELD_COUNT {
                    self.focus_next();
                    None
                } else {
                    Some(FormEvent::Submit(self.value()))
                }
            }
            TuiEvent::Esc => Some(FormEvent::Abort),
            _ => None,
        }
    }
}

impl Component for AddressForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Where are you registered to vote? ")
            .title_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
            .title_bottom(Line::from(Span::styled(
                " tab next field  enter submit  esc quit ",
                Style::default().fg(Color::DarkGray),
            )));
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let rows = Layout::vertical([Constraint::Length(3); FIELD_COUNT]).split(inner);

        for (ix, rect) in rows.iter().enumerate() {
            let focused = ix == self.focused;
            let border = if focused {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let content: Line = if self.fields[ix].is_empty() && !focused {
                Line::from(Span::styled(
                    PLACEHOLDERS[ix],
                    Style::default().fg(Color::DarkGray),
                ))
            } else if focused {
                Line::from(vec![
                    Span::raw(self.fields[ix].clone()),
                    Span::styled("▌", Style::default().fg(Color::Magenta)),
                ])
            } else {
                Line::from(Span::raw(self.fields[ix].clone()))
            };

            let field = Paragraph::new(content).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(format!(" {} ", LABELS[ix])),
            );
            frame.render_widget(field, *rect);
        }
    }
}
