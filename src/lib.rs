//! govote: a terminal UI for looking up polling places, ballot contests,
//! and voter registration resources by postal address, backed by the
//! Google Civic Information API.

pub mod api;
pub mod core;
pub mod tui;
