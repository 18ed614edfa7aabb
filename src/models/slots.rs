use serde::{Deserialize, Serialize};

// A single candidate appointment start time for a given date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: String, // "HH:MM"
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// Incoming slot query. Both fields are optional so that missing values
// produce a descriptive 400 instead of a bare deserialization failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct SlotQuery {
    pub date: Option<String>,
    pub duration: Option<i64>,
}

// Response structure for the slot query endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct SlotQueryResponse {
    #[serde(rename = "timeSlots")]
    pub time_slots: Vec<TimeSlot>,
    pub date: String,
    pub duration: i64,
}

// Error body shared by all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
