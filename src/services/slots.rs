use chrono::NaiveDate;
use tracing::debug;

use crate::error::SlotError;
use crate::models::slots::TimeSlot;

// Business hours as minutes from midnight, half-open: a booking may start at
// opening and must end at or before closing. Both the authoritative
// computation and the fallback generator read these same constants, so the
// fallback's candidate times can never drift from the authoritative set.
pub const BUSINESS_OPEN_MIN: u32 = 9 * 60;
pub const BUSINESS_CLOSE_MIN: u32 = 18 * 60;
pub const SLOT_GRANULARITY_MIN: u32 = 30;

// Longest bookable duration accepted by validation
const MAX_DURATION_MIN: i64 = 24 * 60;

// Parse an "HH:MM" string into minutes from midnight
pub fn parse_minutes(time: &str) -> Result<u32, String> {
    let mut parts = time.split(':');
    let hour = parts
        .next()
        .and_then(|h| h.parse::<u32>().ok())
        .ok_or_else(|| format!("invalid time '{}': expected HH:MM", time))?;
    let minute = parts
        .next()
        .and_then(|m| m.parse::<u32>().ok())
        .ok_or_else(|| format!("invalid time '{}': expected HH:MM", time))?;

    if parts.next().is_some() || hour > 23 || minute > 59 {
        return Err(format!("invalid time '{}': expected HH:MM", time));
    }

    Ok(hour * 60 + minute)
}

// Format minutes from midnight as "HH:MM"
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

// Two half-open intervals [a, b) and [c, d) overlap iff a < d && c < b.
// Touching endpoints do not overlap.
fn overlaps(a: u32, b: u32, c: u32, d: u32) -> bool {
    a < d && c < b
}

/// Validate a raw slot query, returning the parsed date and duration.
///
/// `date` must be a valid `YYYY-MM-DD` calendar date and `duration` a
/// positive number of minutes. Missing or malformed values map to a 400.
pub fn parse_slot_query(
    date: Option<&str>,
    duration: Option<i64>,
) -> Result<(NaiveDate, u32), SlotError> {
    let date_str = date.ok_or_else(|| SlotError::Validation("date is required".to_string()))?;
    let duration =
        duration.ok_or_else(|| SlotError::Validation("duration is required".to_string()))?;

    let parsed_date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
        SlotError::Validation(format!(
            "invalid date '{}': expected YYYY-MM-DD",
            date_str
        ))
    })?;

    if duration <= 0 {
        return Err(SlotError::Validation(
            "duration must be a positive number of minutes".to_string(),
        ));
    }
    if duration > MAX_DURATION_MIN {
        return Err(SlotError::Validation(
            "duration must not exceed 24 hours".to_string(),
        ));
    }

    Ok((parsed_date, duration as u32))
}

// Candidate start times for the given duration: every granularity step from
// opening whose full interval still ends at or before closing. Starts that
// would cross the closing boundary are excluded entirely.
fn candidate_starts(duration_minutes: u32) -> Vec<u32> {
    let mut starts = Vec::new();
    let mut start = BUSINESS_OPEN_MIN;
    while start + duration_minutes <= BUSINESS_CLOSE_MIN {
        starts.push(start);
        start += SLOT_GRANULARITY_MIN;
    }
    starts
}

/// Compute the availability of every candidate slot on a date.
///
/// `booked` holds the `[start, end)` intervals (minutes from midnight) of all
/// non-cancelled appointments on the queried date. A candidate is available
/// iff its own half-open interval overlaps none of them. Pure function of its
/// inputs; slots come back in ascending time order and an empty result is a
/// valid answer (nothing fits, or the day is fully booked).
pub fn compute_available_slots(duration_minutes: u32, booked: &[(u32, u32)]) -> Vec<TimeSlot> {
    let slots: Vec<TimeSlot> = candidate_starts(duration_minutes)
        .into_iter()
        .map(|start| {
            let end = start + duration_minutes;
            let conflict = booked
                .iter()
                .any(|&(booked_start, booked_end)| overlaps(start, end, booked_start, booked_end));

            TimeSlot {
                time: format_minutes(start),
                available: !conflict,
                reason: if conflict {
                    Some("already booked".to_string())
                } else {
                    None
                },
            }
        })
        .collect();

    debug!(
        "Computed {} candidate slots for duration {} minutes ({} booked intervals)",
        slots.len(),
        duration_minutes,
        booked.len()
    );

    slots
}

/// Generate fallback slots when the authoritative store is unreachable.
///
/// Stateless: knows only business hours and the requested duration, so every
/// included slot is available. Starts that do not fit before closing are
/// omitted rather than marked unavailable. Strictly an upper bound on real
/// availability; callers must present the result as degraded.
pub fn generate_fallback_slots(duration_minutes: u32) -> Vec<TimeSlot> {
    candidate_starts(duration_minutes)
        .into_iter()
        .map(|start| TimeSlot {
            time: format_minutes(start),
            available: true,
            reason: None,
        })
        .collect()
}
