//! # Core Session Logic
//!
//! Domain state and the page state machine. Nothing in here knows about
//! ratatui, crossterm, or HTTP; the `tui` module drives it with actions
//! and performs the effects `update()` hands back.
//!
//! - [`state`]: the `App` session record and the `Screen` enum
//! - [`action`]: the `Action`/`Effect` pair and the `update()` reducer
//! - [`address`]: the user-entered address
//! - [`config`]: startup configuration and the required API credential

pub mod action;
pub mod address;
pub mod config;
pub mod state;
