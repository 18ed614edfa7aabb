use axum::{
    routing::{any, get, post},
    Router,
};
use std::sync::Arc;
use tracing::info;

use crate::handlers::api::{
    cancel_appointment, create_appointment, get_time_slots, import_categories, list_categories,
    AppState,
};
use crate::handlers::test::{health_check, sample_payloads};
use crate::proxy::caldav_proxy;

pub fn create_router(app_state: Arc<AppState>, is_production: bool) -> Router {
    let mut router = Router::new();

    // Health check is always available
    let health_route = Router::new().route("/health", get(health_check));
    router = router.merge(health_route);

    // Booking routes are always available
    let booking_routes = Router::new()
        .route("/api/time-slots", post(get_time_slots))
        .route("/api/appointments", post(create_appointment))
        .route("/api/appointments/:appointment_id/cancel", post(cancel_appointment))
        .route("/api/categories", get(list_categories));
    router = router.merge(booking_routes);

    // CalDAV passthrough accepts any method, including WebDAV verbs
    let caldav_route = Router::new().route("/caldav/*path", any(caldav_proxy));
    router = router.merge(caldav_route);

    // Only add admin and test routes if not in production mode
    if !is_production {
        let admin_routes = Router::new()
            .route("/api/categories/import", post(import_categories))
            .route("/api/test/samples", get(sample_payloads));

        router = router.merge(admin_routes);

        info!("Admin routes enabled - server running in development mode");
    } else {
        info!("Running in production mode - admin and test endpoints disabled");
    }

    router.with_state(app_state)
}
