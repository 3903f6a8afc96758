//! Backend feed shapes and the fetch request queue.
//!
//! The dashboard talks to one HTTP collaborator:
//! - `GET /api/data` returns an array of flight routes.
//! - `GET /api/noise?index=N` returns a scattered noise sheet.
//!
//! Transport is out of scope here; this crate owns the JSON shapes, their
//! validation, and the deterministic queue of pending fetches.

pub mod fetch;
pub mod flight;
pub mod noise;

pub use fetch::{FeedKind, FeedPayload, FeedRequest, FetchQueue};
pub use flight::{FlightRoute, PathSample, parse_flight_routes};
pub use noise::{NoisePoint, NoiseSheet, parse_noise_sheet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    Json(String),
    EmptyPath { route: String },
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Json(msg) => write!(f, "malformed feed payload: {msg}"),
            FeedError::EmptyPath { route } => {
                write!(f, "flight route {route:?} has an empty path")
            }
        }
    }
}

impl std::error::Error for FeedError {}
