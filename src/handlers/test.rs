use axum::response::Json;
use serde::Serialize;
use serde_json::{json, Value};

// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

// Sample payloads for manual testing against a development server
#[derive(Debug, Serialize)]
pub struct SamplePayloads {
    pub slot_query_example: Value,
    pub create_appointment_example: Value,
    pub category_import_example: Value,
    pub api_endpoints: Vec<String>,
}

// Test endpoint that returns sample request bodies
pub async fn sample_payloads() -> Json<SamplePayloads> {
    let slot_query = json!({
        "date": "2026-09-01",
        "duration": 60
    });

    let create_appointment = json!({
        "customer_name": "Test Customer",
        "customer_email": "test@example.com",
        "customer_phone": "555-0100",
        "service_id": "svc-classic-cut",
        "appointment_date": "2026-09-01",
        "appointment_time": "10:00",
        "duration": 60,
        "notes": "First visit"
    });

    let category_import = json!({
        "categories": [
            {
                "name": "Haircuts",
                "description": "Standard cuts",
                "services": [
                    { "name": "Classic Cut", "duration": 30, "price": 35.0 },
                    { "name": "Cut and Style", "duration": 60, "price": 55.0 }
                ]
            }
        ]
    });

    let endpoints = vec![
        "POST /api/time-slots - Query slot availability for a date".to_string(),
        "POST /api/appointments - Book an appointment".to_string(),
        "POST /api/appointments/{id}/cancel - Cancel an appointment".to_string(),
        "POST /api/categories/import - Bulk-import service categories".to_string(),
        "ANY /caldav/{path} - Forward a CalDAV request upstream".to_string(),
    ];

    Json(SamplePayloads {
        slot_query_example: slot_query,
        create_appointment_example: create_appointment,
        category_import_example: category_import,
        api_endpoints: endpoints,
    })
}
