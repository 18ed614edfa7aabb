//! CBRC Booking Service
//!
//! A booking/appointment web service that owns appointment state in an
//! explicit CSV-backed store and computes time-slot availability in-process.
//! It also forwards CalDAV calendar requests to an upstream server through a
//! generic reverse proxy.
//!
//! # Modules
//!
//! - `services::slots`: availability computation and the fallback generator
//! - `services::database`: appointment and service-category store
//! - `client`: slot-query client with fallback and stale-result discard
//! - `proxy`: declarative reverse proxy for the CalDAV endpoint
//!
//! # Availability
//!
//! Slots are generated at a fixed 30-minute granularity within business
//! hours (09:00-18:00, half-open) and checked against existing appointments
//! with half-open interval overlap, so back-to-back bookings that touch at
//! an endpoint never conflict.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod proxy;
pub mod routes;
pub mod services;


// Re-export the main types for ease of use
pub use client::{BookingApiClient, SlotOutcome};
pub use config::AppConfig;
pub use handlers::api::AppState;
pub use proxy::CalDavProxy;
pub use routes::create_router;
