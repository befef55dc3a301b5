//! Top tab bar. Shows the app name, the three sections once election data
//! exists, and a back hint on detail pages.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::action::Action;
use crate::core::state::{App, Screen};
use crate::tui::component::Component;

/// Single-letter menu shortcuts. The caller checks that the menu is live
/// and that no filter is being typed before mapping these.
pub fn menu_action(c: char) -> Option<Action> {
    match c {
        'v' => Some(Action::ShowVote),
        'c' => Some(Action::ShowContests),
        'r' => Some(Action::ShowRegister),
        'q' => Some(Action::Quit),
        _ => None,
    }
}

pub struct Header<'a> {
    pub app: &'a App,
}

impl Component for Header<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                " govote ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];

        if self.app.has_menu() {
            for (key, label, screens) in [
                (
                    "[V]",
                    " Vote  ",
                    &[Screen::VotingOptions, Screen::PollingPlaceDetail][..],
                ),
                (
                    "[C]",
                    " Contests  ",
                    &[Screen::ContestList, Screen::ContestDetail][..],
                ),
                ("[R]", " Register  ", &[Screen::Registration][..]),
            ] {
                let active = screens.contains(&self.app.screen);
                let style = if active {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                spans.push(Span::styled(key, style.fg(Color::Magenta)));
                spans.push(Span::styled(label, style));
            }
        }

        if matches!(
            self.app.screen,
            Screen::PollingPlaceDetail | Screen::ContestDetail
        ) {
            spans.push(Span::styled(
                "[ESC] Back  ",
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::styled(
            "[Q] Quit ",
            Style::default().fg(Color::DarkGray),
        ));

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(header, area);
    }
}
