use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{info, warn};

use crate::models::slots::{ErrorResponse, SlotQuery, SlotQueryResponse, TimeSlot};
use crate::services::slots::generate_fallback_slots;

// Shown alongside fallback slots so degraded availability is never mistaken
// for the authoritative answer
const DEGRADED_MESSAGE: &str =
    "Live availability is unavailable; showing standard business hours";

/// Outcome of a slot query as seen by a UI caller.
#[derive(Debug, PartialEq)]
pub enum SlotOutcome {
    /// The service answered; slots reflect real bookings.
    Authoritative(Vec<TimeSlot>),
    /// The service failed; slots are the structural upper bound from the
    /// fallback generator and must be presented as degraded.
    Fallback {
        slots: Vec<TimeSlot>,
        message: String,
    },
    /// A newer query was issued while this one was in flight; the result
    /// must be discarded.
    Superseded,
}

/// Client for the slot query endpoint with fallback behavior.
///
/// Carries a generation counter: each `fetch_time_slots` call bumps it, and
/// a response arriving after a newer call has started is reported as
/// `Superseded` so stale availability is never displayed. The last-issued
/// query is always the source of truth.
pub struct BookingApiClient {
    client: Client,
    endpoint: String,
    generation: AtomicU64,
}

impl BookingApiClient {
    pub fn new(endpoint: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            generation: AtomicU64::new(0),
        }
    }

    // Start a new query generation, invalidating any in-flight query
    pub fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    // Whether a result from the given generation may still be applied
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Fetch availability for `(date, duration)`.
    ///
    /// On success the authoritative slots come back verbatim. On any
    /// failure (transport error, timeout, non-2xx status, unparseable body)
    /// the fallback generator supplies the slots instead, together with a
    /// degraded-mode message. This client never synthesizes slot data on
    /// the success path.
    pub async fn fetch_time_slots(&self, date: &str, duration: u32) -> SlotOutcome {
        let generation = self.next_generation();

        let outcome = self.query(date, duration).await;

        if !self.is_current(generation) {
            info!("Discarding superseded slot query for {} ({} min)", date, duration);
            return SlotOutcome::Superseded;
        }

        outcome
    }

    async fn query(&self, date: &str, duration: u32) -> SlotOutcome {
        let url = format!("{}/api/time-slots", self.endpoint);
        let body = SlotQuery {
            date: Some(date.to_string()),
            duration: Some(duration as i64),
        };

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Slot query transport failure: {}", e);
                return self.fallback(duration);
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("status {}", status));
            warn!("Slot query failed upstream: {}", detail);
            return self.fallback(duration);
        }

        match response.json::<SlotQueryResponse>().await {
            Ok(parsed) => {
                info!(
                    "Received {} authoritative slots for {}",
                    parsed.time_slots.len(),
                    date
                );
                SlotOutcome::Authoritative(parsed.time_slots)
            }
            Err(e) => {
                warn!("Slot query returned unparseable body: {}", e);
                self.fallback(duration)
            }
        }
    }

    fn fallback(&self, duration: u32) -> SlotOutcome {
        SlotOutcome::Fallback {
            slots: generate_fallback_slots(duration),
            message: DEGRADED_MESSAGE.to_string(),
        }
    }
}
