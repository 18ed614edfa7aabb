use chrono::Utc;
use csv::{ReaderBuilder, WriterBuilder};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::{error, info, warn};

use crate::error::StoreError;
use crate::models::appointment::CreateAppointmentRequest;
use crate::models::category::CategoryImportItem;
use crate::services::slots::{format_minutes, parse_minutes, BUSINESS_CLOSE_MIN, BUSINESS_OPEN_MIN};

// Appointment row as stored in CSV. Field order must match the header row
// written on bootstrap.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppointmentRecord {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_id: String,
    pub appointment_date: String, // "YYYY-MM-DD"
    pub appointment_time: String, // "HH:MM"
    pub duration: i64,            // minutes
    pub notes: String,
    pub status: String,       // "confirmed" or "cancelled"
    pub created_at: String,   // ISO format
    pub cancelled_at: String, // ISO format (empty if not cancelled)
}

pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_CANCELLED: &str = "cancelled";

// Service category row as stored in CSV; services are kept as a JSON column
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CategoryRecord {
    pub name: String,
    pub description: String,
    pub services: String, // JSON array of {name, duration, price}
    pub imported_at: String,
}

const APPOINTMENT_HEADERS: [&str; 12] = [
    "id",
    "customer_name",
    "customer_email",
    "customer_phone",
    "service_id",
    "appointment_date",
    "appointment_time",
    "duration",
    "notes",
    "status",
    "created_at",
    "cancelled_at",
];

const CATEGORY_HEADERS: [&str; 4] = ["name", "description", "services", "imported_at"];

// Store for appointment and service-category state. The sole writer of the
// rows the availability query reads; the file mutex makes every
// check-then-insert atomic with respect to other bookings.
pub struct AppointmentStore {
    appointments_path: String,
    categories_path: String,
    file_mutex: Mutex<()>,
}

impl AppointmentStore {
    pub fn new(appointments_path: &str, categories_path: &str) -> Self {
        Self::bootstrap_file(appointments_path, &APPOINTMENT_HEADERS);
        Self::bootstrap_file(categories_path, &CATEGORY_HEADERS);

        Self {
            appointments_path: appointments_path.to_string(),
            categories_path: categories_path.to_string(),
            file_mutex: Mutex::new(()),
        }
    }

    // Create the CSV file with its header row if it does not exist yet
    fn bootstrap_file(path: &str, headers: &[&str]) {
        if Path::new(path).exists() {
            return;
        }

        info!("Creating new database file at {}", path);

        let file = File::create(path).unwrap_or_else(|e| {
            error!("Failed to create database file {}: {}", path, e);
            panic!("Failed to create database file: {}", e)
        });

        let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

        if let Err(e) = writer.write_record(headers) {
            error!("Failed to write headers to {}: {}", path, e);
            panic!("Failed to write headers: {}", e);
        }

        if let Err(e) = writer.flush() {
            error!("Failed to flush headers to {}: {}", path, e);
            panic!("Failed to flush headers: {}", e);
        }
    }

    fn read_appointments(&self) -> Result<Vec<AppointmentRecord>, StoreError> {
        let file = File::open(&self.appointments_path)?;
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: AppointmentRecord = result?;
            records.push(record);
        }
        Ok(records)
    }

    fn append_appointment(&self, record: &AppointmentRecord) -> Result<(), StoreError> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.appointments_path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    fn rewrite_appointments(&self, records: &[AppointmentRecord]) -> Result<(), StoreError> {
        let file = File::create(&self.appointments_path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(APPOINTMENT_HEADERS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Return the non-cancelled appointments on a date.
    ///
    /// Read under the file mutex so the availability query sees a consistent
    /// snapshot even while bookings are being written concurrently.
    pub fn appointments_on_date(&self, date: &str) -> Result<Vec<AppointmentRecord>, StoreError> {
        let _guard = self
            .file_mutex
            .lock()
            .map_err(|e| StoreError::Io(format!("appointment store lock poisoned: {}", e)))?;

        let records = self.read_appointments()?;
        Ok(records
            .into_iter()
            .filter(|r| r.appointment_date == date && r.status != STATUS_CANCELLED)
            .collect())
    }

    // Booked [start, end) intervals in minutes from midnight for a date.
    // Rows with unparseable times are logged and skipped rather than
    // poisoning the whole query.
    pub fn booked_intervals(&self, date: &str) -> Result<Vec<(u32, u32)>, StoreError> {
        let records = self.appointments_on_date(date)?;

        let mut intervals = Vec::new();
        for record in records {
            match parse_minutes(&record.appointment_time) {
                Ok(start) if record.duration > 0 => {
                    intervals.push((start, start + record.duration as u32));
                }
                Ok(_) => {
                    warn!(
                        "Skipping appointment {} with non-positive duration {}",
                        record.id, record.duration
                    );
                }
                Err(e) => {
                    warn!("Skipping appointment {} with bad time: {}", record.id, e);
                }
            }
        }
        Ok(intervals)
    }

    /// Book an appointment, re-validating availability atomically.
    ///
    /// The conflict check and the insert happen under one lock acquisition,
    /// so two concurrent bookings for overlapping slots cannot both succeed.
    /// Returns the generated appointment id.
    pub fn store_appointment(
        &self,
        request: &CreateAppointmentRequest,
    ) -> Result<String, StoreError> {
        let start = parse_minutes(&request.appointment_time).map_err(StoreError::Validation)?;

        if request.duration <= 0 {
            return Err(StoreError::Validation(
                "duration must be a positive number of minutes".to_string(),
            ));
        }
        let end = start + request.duration as u32;

        if start < BUSINESS_OPEN_MIN || end > BUSINESS_CLOSE_MIN {
            return Err(StoreError::Validation(format!(
                "appointment {}-{} is outside business hours {}-{}",
                format_minutes(start),
                format_minutes(end),
                format_minutes(BUSINESS_OPEN_MIN),
                format_minutes(BUSINESS_CLOSE_MIN),
            )));
        }

        let _guard = self
            .file_mutex
            .lock()
            .map_err(|e| StoreError::Io(format!("appointment store lock poisoned: {}", e)))?;

        // Re-validate against existing bookings inside the lock
        let records = self.read_appointments()?;
        let conflict = records.iter().any(|r| {
            if r.appointment_date != request.appointment_date || r.status == STATUS_CANCELLED {
                return false;
            }
            match parse_minutes(&r.appointment_time) {
                Ok(booked_start) if r.duration > 0 => {
                    let booked_end = booked_start + r.duration as u32;
                    start < booked_end && booked_start < end
                }
                _ => false,
            }
        });

        if conflict {
            info!(
                "Rejecting booking for {} at {}: time slot is already booked",
                request.appointment_date, request.appointment_time
            );
            return Err(StoreError::Conflict(
                "Time slot is already booked".to_string(),
            ));
        }

        let id = generate_appointment_id();
        let record = AppointmentRecord {
            id: id.clone(),
            customer_name: request.customer_name.clone(),
            customer_email: request.customer_email.clone(),
            customer_phone: request.customer_phone.clone().unwrap_or_default(),
            service_id: request.service_id.clone(),
            appointment_date: request.appointment_date.clone(),
            appointment_time: request.appointment_time.clone(),
            duration: request.duration,
            notes: request.notes.clone().unwrap_or_default(),
            status: STATUS_CONFIRMED.to_string(),
            created_at: Utc::now().to_rfc3339(),
            cancelled_at: String::new(),
        };

        self.append_appointment(&record)?;

        info!(
            "Stored appointment {} for {} at {} ({} minutes)",
            id, record.appointment_date, record.appointment_time, record.duration
        );

        Ok(id)
    }

    /// Mark an appointment cancelled. Returns false when the id is unknown
    /// or the appointment is already cancelled. Cancelled rows are retained
    /// but stop blocking slots.
    pub fn cancel_appointment(&self, appointment_id: &str) -> Result<bool, StoreError> {
        let _guard = self
            .file_mutex
            .lock()
            .map_err(|e| StoreError::Io(format!("appointment store lock poisoned: {}", e)))?;

        let mut records = self.read_appointments()?;
        let mut cancelled = false;

        for record in records.iter_mut() {
            if record.id == appointment_id && record.status != STATUS_CANCELLED {
                record.status = STATUS_CANCELLED.to_string();
                record.cancelled_at = Utc::now().to_rfc3339();
                cancelled = true;
            }
        }

        if cancelled {
            self.rewrite_appointments(&records)?;
            info!("Cancelled appointment {}", appointment_id);
        } else {
            warn!("No active appointment found with id {}", appointment_id);
        }

        Ok(cancelled)
    }

    fn read_categories(&self) -> Result<Vec<CategoryRecord>, StoreError> {
        let file = File::open(&self.categories_path)?;
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: CategoryRecord = result?;
            records.push(record);
        }
        Ok(records)
    }

    fn rewrite_categories(&self, records: &[CategoryRecord]) -> Result<(), StoreError> {
        let file = File::create(&self.categories_path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(CATEGORY_HEADERS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Bulk-upsert service categories keyed by name.
    /// Returns (inserted, updated) counts.
    pub fn import_categories(
        &self,
        items: &[CategoryImportItem],
    ) -> Result<(usize, usize), StoreError> {
        let _guard = self
            .file_mutex
            .lock()
            .map_err(|e| StoreError::Io(format!("appointment store lock poisoned: {}", e)))?;

        let mut records = self.read_categories()?;
        let now = Utc::now().to_rfc3339();

        let mut inserted = 0;
        let mut updated = 0;

        for item in items {
            let services_json = serde_json::to_string(&item.services)
                .map_err(|e| StoreError::Io(format!("failed to encode services: {}", e)))?;

            match records.iter_mut().find(|r| r.name == item.name) {
                Some(existing) => {
                    existing.description = item.description.clone().unwrap_or_default();
                    existing.services = services_json;
                    existing.imported_at = now.clone();
                    updated += 1;
                }
                None => {
                    records.push(CategoryRecord {
                        name: item.name.clone(),
                        description: item.description.clone().unwrap_or_default(),
                        services: services_json,
                        imported_at: now.clone(),
                    });
                    inserted += 1;
                }
            }
        }

        self.rewrite_categories(&records)?;

        info!(
            "Imported service categories: {} inserted, {} updated",
            inserted, updated
        );

        Ok((inserted, updated))
    }

    /// List all stored categories.
    pub fn list_categories(&self) -> Result<Vec<CategoryRecord>, StoreError> {
        let _guard = self
            .file_mutex
            .lock()
            .map_err(|e| StoreError::Io(format!("appointment store lock poisoned: {}", e)))?;
        self.read_categories()
    }
}

// Opaque appointment id: "apt-" plus 12 random alphanumerics
fn generate_appointment_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect();
    format!("apt-{}", suffix)
}
