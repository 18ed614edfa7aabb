use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use std::fmt;

use crate::models::slots::ErrorResponse;

// Failures surfaced by the slot query path
#[derive(Debug)]
pub enum SlotError {
    // Malformed or missing date/duration; never retried
    Validation(String),
    // The appointment store could not produce a snapshot
    Store(String),
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotError::Validation(msg) => write!(f, "validation error: {}", msg),
            SlotError::Store(msg) => write!(f, "store error: {}", msg),
        }
    }
}

impl IntoResponse for SlotError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SlotError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            SlotError::Store(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

// Failures surfaced by the appointment store
#[derive(Debug)]
pub enum StoreError {
    // The requested slot overlaps an existing appointment
    Conflict(String),
    // The request itself is unusable (bad time, outside business hours)
    Validation(String),
    // Underlying file or CSV failure
    Io(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Conflict(msg) => write!(f, "conflict: {}", msg),
            StoreError::Validation(msg) => write!(f, "validation error: {}", msg),
            StoreError::Io(msg) => write!(f, "io error: {}", msg),
        }
    }
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}
