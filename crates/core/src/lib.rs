#![warn(clippy::all, missing_docs)]

//! Core domain logic for the Campus Hub marketplace and rideshare board.
//!
//! This crate hosts the listing models, the append-only store, the
//! simulated-latency access layer, search and validation rules, display
//! mapping, and the listing state consumed by the terminal UI and any
//! future frontends.

pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod listing;
pub mod models;
pub mod search;
pub mod seed;
pub mod store;
pub mod validation;

pub use api::{mock_backend, MockResourceApi, MockRideApi, ResourceApi, RideApi};
pub use config::AppConfig;
pub use error::{ApiError, ValidationError};
pub use listing::{ResourceBoard, RideBoard, Ticket};
pub use models::{NewResource, NewRide, Resource, Ride};
pub use search::CategoryFilter;
pub use store::{Clock, FixedClock, Store, SystemClock};
