//! # Page Rendering
//!
//! One draw function per page, dispatched on the current `Screen`. Pure
//! presentation: nothing here mutates domain state.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Row, Table};

use crate::api::client::FetchError;
use crate::api::types::{Contest, ElectionAdministrationBody};
use crate::core::state::{App, Screen};
use crate::tui::component::Component;
use crate::tui::components::Header;
use crate::tui::{HEADER_HEIGHT, TuiState};

pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let [header_area, body] =
        Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
            .areas(frame.area());

    Header { app }.render(frame, header_area);

    match app.screen {
        Screen::AddressInput => tui.form.render(frame, body),
        Screen::Loading => draw_loading(frame, body, spinner_frame),
        Screen::ErrorRetry => draw_error(frame, body, app),
        Screen::VotingOptions => draw_voting_options(frame, body, tui),
        Screen::ContestList => draw_contest_list(frame, body, app, tui),
        Screen::ContestDetail => draw_contest_detail(frame, body, app),
        Screen::PollingPlaceDetail => draw_polling_place_detail(frame, body, app),
        Screen::Registration => draw_registration(frame, body, app),
    }
}

fn draw_loading(frame: &mut Frame, area: Rect, spinner_frame: usize) {
    let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
    let line = Line::from(vec![
        Span::styled(spinner, Style::default().fg(Color::Magenta)),
        Span::raw(" Loading election information, please wait..."),
    ]);
    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().padding(Padding::top(area.height / 2)));
    frame.render_widget(paragraph, area);
}

/// User-facing text for each failure class. The HTTP split matters: a 4xx
/// means the address probably didn't resolve, a 5xx means the service is
/// having trouble.
pub fn error_message(err: &FetchError) -> String {
    match err {
        FetchError::Http { status } if (400..500).contains(status) => format!(
            "The request failed (HTTP {status}), likely due to an invalid or unrecognized address.\nPlease check https://all.votinginfotool.org to confirm your address is covered."
        ),
        FetchError::Http { status } => format!(
            "The election information service returned HTTP {status}. The API may be down; try again in a little while."
        ),
        FetchError::Network(detail) => format!(
            "Could not reach the election information service: {detail}\nCheck your connection and try again."
        ),
        FetchError::Parse(detail) => {
            format!("The service sent a response we could not read: {detail}")
        }
        FetchError::MissingElectionDay => {
            "No upcoming election was found for that address.".to_string()
        }
    }
}

fn draw_error(frame: &mut Frame, area: Rect, app: &App) {
    let message = app
        .error
        .as_ref()
        .map(error_message)
        .unwrap_or_else(|| "Something went wrong.".to_string());

    let mut lines: Vec<Line> = vec![Line::default()];
    for raw in message.lines() {
        for wrapped in textwrap::wrap(raw, area.width.saturating_sub(6) as usize) {
            lines.push(Line::from(wrapped.into_owned()));
        }
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Press any key to continue...",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Something went wrong ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .padding(Padding::horizontal(2));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_voting_options(frame: &mut Frame, area: Rect, tui: &mut TuiState) {
    match tui.cycler.as_mut() {
        Some(cycler) => cycler.active_list_mut().render(frame, area),
        None => {
            frame.render_widget(Paragraph::new("building list...").alignment(Alignment::Center), area)
        }
    }
}

fn draw_contest_list(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let empty = app
        .election
        .as_ref()
        .is_none_or(|e| e.contests.is_empty());
    if empty {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Contests ")
            .padding(Padding::uniform(1));
        frame.render_widget(
            Paragraph::new("No contests available for this election.").block(block),
            area,
        );
        return;
    }
    if let Some(contests) = tui.contests.as_mut() {
        contests.render(frame, area);
    }
}

fn field_line<'a>(label: &'a str, value: &str) -> Option<Line<'a>> {
    if value.is_empty() {
        return None;
    }
    Some(Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value.to_string()),
    ]))
}

fn draw_contest_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some(contest) = app.selected_contest.as_ref() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", contest.display_title()))
        .title_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .padding(Padding::uniform(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for (label, value) in [
        ("Type", &contest.contest_type),
        ("Office", &contest.office),
        ("District", &contest.district.name),
        ("Primary party", &contest.primary_party),
        ("Special", &contest.special),
        ("Electorate", &contest.electorate_specifications),
        ("Number elected", &contest.number_elected),
        ("Ballot placement", &contest.ballot_placement),
    ] {
        if let Some(line) = field_line(label, value) {
            lines.push(line);
        }
    }

    lines.extend(referendum_lines(contest, inner.width.saturating_sub(2) as usize));

    let candidate_rows = contest.candidates.len() as u16;
    let [text_area, table_area] = Layout::vertical([
        Constraint::Min(lines.len() as u16),
        Constraint::Length(if candidate_rows > 0 {
            candidate_rows + 2
        } else {
            0
        }),
    ])
    .areas(inner);

    frame.render_widget(Paragraph::new(lines), text_area);

    if !contest.candidates.is_empty() {
        let rows: Vec<Row> = contest
            .candidates
            .iter()
            .map(|c| Row::new(vec![c.name.clone(), c.party.clone()]))
            .collect();
        let table = Table::new(rows, [Constraint::Length(45), Constraint::Length(20)])
            .header(
                Row::new(vec!["Name", "Party"])
                    .style(Style::default().add_modifier(Modifier::BOLD))
                    .bottom_margin(1),
            );
        frame.render_widget(table, table_area);
    }
}

fn referendum_lines(contest: &Contest, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (label, value) in [
        ("Referendum", &contest.referendum_title),
        ("Subtitle", &contest.referendum_subtitle),
        ("Brief", &contest.referendum_brief),
        ("Passage threshold", &contest.referendum_passage_threshold),
        ("Effect of abstaining", &contest.referendum_effect_of_abstain),
        ("More info", &contest.referendum_url),
    ] {
        if value.is_empty() {
            continue;
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
            Span::raw(value.clone()),
        ]));
    }
    if !contest.referendum_text.is_empty() {
        lines.push(Line::default());
        for wrapped in textwrap::wrap(&contest.referendum_text, width.max(20)) {
            lines.push(Line::from(wrapped.into_owned()));
        }
    }
    if !contest.referendum_ballot_responses.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Ballot responses:",
            Style::default().fg(Color::DarkGray),
        )));
        for response in &contest.referendum_ballot_responses {
            lines.push(Line::from(format!("  • {response}")));
        }
    }
    if !lines.is_empty() {
        lines.insert(0, Line::default());
    }
    lines
}

/// Splits the free-form `pollingHours` blob into (day, hours) rows. Lines
/// without a ": " separator land in the hours column with an empty day.
pub fn parse_polling_hours(hours: &str) -> Vec<(String, String)> {
    hours
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(": ") {
            Some((day, times)) => (day.to_string(), times.to_string()),
            None => (String::new(), line.to_string()),
        })
        .collect()
}

fn draw_polling_place_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some(place) = app.selected_place.as_ref() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", place.display_name()))
        .title_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .padding(Padding::uniform(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    let address = place.address.display();
    if !address.is_empty() {
        lines.push(Line::from(Span::styled(
            address,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
    }

    if !place.start_date.is_empty() || !place.end_date.is_empty() {
        if let Some(line) = field_line(
            "Open",
            &format!("{} → {}", place.start_date, place.end_date),
        ) {
            lines.push(line);
        }
    }
    if let Some(line) = field_line("Services", &place.voter_services) {
        lines.push(line);
    }
    if let Some(line) = field_line("Notes", &place.notes) {
        lines.push(line);
    }
    if let Some(url) = place.maps_url() {
        lines.push(Line::from(vec![
            Span::styled("Map: ", Style::default().fg(Color::DarkGray)),
            Span::styled(url, Style::default().fg(Color::Blue)),
        ]));
    }

    let hours = parse_polling_hours(&place.polling_hours);
    let [text_area, hours_area] = Layout::vertical([
        Constraint::Min(lines.len() as u16),
        Constraint::Length(if hours.is_empty() {
            0
        } else {
            hours.len() as u16 + 2
        }),
    ])
    .areas(inner);

    frame.render_widget(Paragraph::new(lines), text_area);

    if !hours.is_empty() {
        let rows: Vec<Row> = hours
            .into_iter()
            .map(|(day, times)| Row::new(vec![day, times]))
            .collect();
        let table = Table::new(rows, [Constraint::Length(25), Constraint::Min(20)]).header(
            Row::new(vec!["Day", "Hours"])
                .style(Style::default().add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        );
        frame.render_widget(table, hours_area);
    }
}

fn administration_lines<'a>(body: &ElectionAdministrationBody) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for (label, value) in [
        ("Office", &body.name),
        ("Register", &body.election_registration_url),
        ("Check registration", &body.election_registration_confirmation_url),
        ("Election info", &body.election_info_url),
        ("Absentee voting", &body.absentee_voting_info_url),
        ("Find your ballot", &body.ballot_info_url),
        ("Hours", &body.hours_of_operation),
    ] {
        if let Some(line) = field_line(label, value) {
            lines.push(line);
        }
    }
    if !body.correspondence_address.is_blank() {
        if let Some(line) = field_line("Mail", &body.correspondence_address.display()) {
            lines.push(line);
        }
    }
    if !body.physical_address.is_blank() {
        if let Some(line) = field_line("Visit", &body.physical_address.display()) {
            lines.push(line);
        }
    }
    if !body.voter_services.is_empty() {
        lines.push(Line::from(Span::styled(
            "Services:".to_string(),
            Style::default().fg(Color::DarkGray),
        )));
        for service in &body.voter_services {
            lines.push(Line::from(format!("  • {service}")));
        }
    }
    for official in &body.election_officials {
        let mut parts = vec![official.name.clone()];
        if !official.title.is_empty() {
            parts.push(official.title.clone());
        }
        if !official.office_phone_number.is_empty() {
            parts.push(official.office_phone_number.clone());
        }
        if !official.email_address.is_empty() {
            parts.push(official.email_address.clone());
        }
        if let Some(line) = field_line("Contact", &parts.join(" · ")) {
            lines.push(line);
        }
    }
    lines
}

fn draw_registration(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.election.as_ref().and_then(|e| e.state.first());

    let Some(state) = state else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Registration ")
            .padding(Padding::uniform(1));
        frame.render_widget(
            Paragraph::new("No registration information available for this address.").block(block),
            area,
        );
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Register in {} ", state.name))
        .title_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .padding(Padding::uniform(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = administration_lines(&state.election_administration_body);

    if let Some(local) = state.local_jurisdiction.as_ref() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Local jurisdiction: {}", local.name),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.extend(administration_lines(&local.election_administration_body));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polling_hours_split_into_day_and_times() {
        let hours = "Mon: 9am - 5pm\nTue: 9am - 5pm\n\nElection day hours may vary";
        let parsed = parse_polling_hours(hours);
        assert_eq!(
            parsed,
            vec![
                ("Mon".to_string(), "9am - 5pm".to_string()),
                ("Tue".to_string(), "9am - 5pm".to_string()),
                (String::new(), "Election day hours may vary".to_string()),
            ]
        );
    }

    #[test]
    fn polling_hours_empty_input() {
        assert!(parse_polling_hours("").is_empty());
    }

    #[test]
    fn error_messages_distinguish_failure_classes() {
        let bad_address = error_message(&FetchError::Http { status: 400 });
        assert!(bad_address.contains("invalid or unrecognized address"));
        assert!(bad_address.contains("400"));

        let upstream = error_message(&FetchError::Http { status: 503 });
        assert!(upstream.contains("API may be down"));
        assert!(!upstream.contains("address"));

        let network = error_message(&FetchError::Network("timed out".into()));
        assert!(network.contains("timed out"));

        let no_election = error_message(&FetchError::MissingElectionDay);
        assert!(no_election.contains("No upcoming election"));
    }
}
