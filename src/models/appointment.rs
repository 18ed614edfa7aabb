use serde::{Deserialize, Serialize};

// Request body for the appointment creation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub service_id: String,
    pub appointment_date: String, // "YYYY-MM-DD"
    pub appointment_time: String, // "HH:MM"
    pub duration: i64,            // minutes, resolved from the service
    #[serde(default)]
    pub notes: Option<String>,
}

// Response structure for the appointment creation endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAppointmentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub appointment_id: Option<String>,
}

// Response structure for the cancellation endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct CancelAppointmentResponse {
    pub success: bool,
    pub message: String,
}
