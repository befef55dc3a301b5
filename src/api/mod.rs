//! The civic-information fetch collaborator: wire schema plus the HTTP
//! client that queries it.

pub mod client;
pub mod types;

pub use client::{CivicClient, FetchError};
pub use types::VoterInfoResponse;
