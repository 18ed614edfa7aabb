use axum::{
    extract::{Json as ExtractJson, Path, State},
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::error::{SlotError, StoreError};
use crate::models::appointment::{
    CancelAppointmentResponse, CreateAppointmentRequest, CreateAppointmentResponse,
};
use crate::models::category::{CategoryImportRequest, CategoryImportSummary};
use crate::models::slots::{SlotQuery, SlotQueryResponse};
use crate::proxy::CalDavProxy;
use crate::services::database::{AppointmentStore, CategoryRecord};
use crate::services::slots::{compute_available_slots, parse_slot_query};

// AppState struct containing shared resources
pub struct AppState {
    pub database: Arc<AppointmentStore>,
    pub caldav: Option<CalDavProxy>,
}

// Slot availability query endpoint
pub async fn get_time_slots(
    State(state): State<Arc<AppState>>,
    ExtractJson(query): ExtractJson<SlotQuery>,
) -> Result<Json<SlotQueryResponse>, SlotError> {
    let (date, duration) = parse_slot_query(query.date.as_deref(), query.duration)?;
    let date_str = date.format("%Y-%m-%d").to_string();

    info!(
        "Received slot query for {} with duration {} minutes",
        date_str, duration
    );

    let booked = state.database.booked_intervals(&date_str).map_err(|e| {
        error!("Failed to read appointments for {}: {}", date_str, e);
        SlotError::Store("failed to read appointment data".to_string())
    })?;

    let time_slots = compute_available_slots(duration, &booked);

    info!(
        "Returning {} slots for {} ({} available)",
        time_slots.len(),
        date_str,
        time_slots.iter().filter(|s| s.available).count()
    );

    Ok(Json(SlotQueryResponse {
        time_slots,
        date: date_str,
        duration: duration as i64,
    }))
}

// Appointment creation endpoint. The sole writer of the appointment state
// the availability query reads; availability is re-validated atomically in
// the store, so a stale availability check cannot double-book a slot.
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<CreateAppointmentRequest>,
) -> Result<Json<CreateAppointmentResponse>, SlotError> {
    parse_slot_query(Some(&request.appointment_date), Some(request.duration))?;

    info!(
        "Received booking request for {} at {} ({} minutes)",
        request.appointment_date, request.appointment_time, request.duration
    );

    match state.database.store_appointment(&request) {
        Ok(appointment_id) => {
            info!("Created appointment {}", appointment_id);
            Ok(Json(CreateAppointmentResponse {
                success: true,
                error: None,
                appointment_id: Some(appointment_id),
            }))
        }
        // A conflicting booking is a domain outcome, not a transport failure
        Err(StoreError::Conflict(msg)) => {
            info!("Booking rejected: {}", msg);
            Ok(Json(CreateAppointmentResponse {
                success: false,
                error: Some(msg),
                appointment_id: None,
            }))
        }
        Err(StoreError::Validation(msg)) => Err(SlotError::Validation(msg)),
        Err(e) => {
            error!("Failed to store appointment: {}", e);
            Err(SlotError::Store("failed to store appointment".to_string()))
        }
    }
}

// Appointment cancellation endpoint
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<CancelAppointmentResponse>, SlotError> {
    info!("Received request to cancel appointment {}", appointment_id);

    match state.database.cancel_appointment(&appointment_id) {
        Ok(true) => Ok(Json(CancelAppointmentResponse {
            success: true,
            message: format!("Appointment {} cancelled", appointment_id),
        })),
        Ok(false) => Ok(Json(CancelAppointmentResponse {
            success: false,
            message: format!("No active appointment found with id {}", appointment_id),
        })),
        Err(e) => {
            error!("Failed to cancel appointment {}: {}", appointment_id, e);
            Err(SlotError::Store("failed to cancel appointment".to_string()))
        }
    }
}

// Category bulk-import endpoint
pub async fn import_categories(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<CategoryImportRequest>,
) -> Result<Json<CategoryImportSummary>, SlotError> {
    info!(
        "Received category import with {} categories",
        request.categories.len()
    );

    if request.categories.is_empty() {
        return Err(SlotError::Validation(
            "categories must not be empty".to_string(),
        ));
    }

    match state.database.import_categories(&request.categories) {
        Ok((inserted, updated)) => Ok(Json(CategoryImportSummary {
            success: true,
            inserted,
            updated,
        })),
        Err(e) => {
            error!("Category import failed: {}", e);
            Err(SlotError::Store("failed to import categories".to_string()))
        }
    }
}

// List stored service categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryRecord>>, SlotError> {
    match state.database.list_categories() {
        Ok(categories) => Ok(Json(categories)),
        Err(e) => {
            error!("Failed to list categories: {}", e);
            Err(SlotError::Store("failed to list categories".to_string()))
        }
    }
}
