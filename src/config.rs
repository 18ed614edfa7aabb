use dotenv::dotenv;
use std::env;
use tracing::info;

/// Process-wide configuration, read from the environment exactly once at
/// startup and passed down explicitly. Handlers never re-read the
/// environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub appointments_csv_path: String,
    pub categories_csv_path: String,
    // Upstream CalDAV calendar endpoint; the proxy fails closed when unset
    pub caldav_endpoint: Option<String>,
    // Service-level credential injected into forwarded requests
    pub service_key: Option<String>,
    pub port: u16,
    pub is_production: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenv().ok();

        let appointments_csv_path = env::var("APPOINTMENTS_CSV_PATH")
            .unwrap_or_else(|_| "data/appointments.csv".to_string());

        let categories_csv_path = env::var("CATEGORIES_CSV_PATH")
            .unwrap_or_else(|_| "data/service_categories.csv".to_string());

        let caldav_endpoint = env::var("CALDAV_ENDPOINT").ok().filter(|v| !v.is_empty());
        let service_key = env::var("SERVICE_ROLE_KEY").ok().filter(|v| !v.is_empty());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3000);

        let is_production = env::var("ENVIRONMENT")
            .map(|val| val.to_lowercase() == "production")
            .unwrap_or(false);

        if caldav_endpoint.is_some() && service_key.is_some() {
            info!("CalDAV proxying enabled");
        } else {
            info!("CalDAV endpoint or service key not configured - proxy requests will fail closed");
        }

        Self {
            appointments_csv_path,
            categories_csv_path,
            caldav_endpoint,
            service_key,
            port,
            is_production,
        }
    }
}
