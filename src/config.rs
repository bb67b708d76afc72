use dotenvy::dotenv;
use std::env;

pub const DEFAULT_ENDPOINT: &str = "https://api.sampleapis.com/countries/countries";

pub struct Config {
    pub countries_api_url: String,
    /// How many rows past the visible window an image cell may sit and still
    /// start loading.
    pub image_proximity_rows: usize,
    pub tick_interval_ms: u64,
    pub log_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv().ok();

        Ok(Self {
            countries_api_url: env::var("COUNTRIES_API_URL")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            image_proximity_rows: env::var("IMAGE_PROXIMITY_ROWS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .unwrap_or(20),
            tick_interval_ms: env::var("TICK_INTERVAL_MS")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap_or(120),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "countryscope.log".to_string()),
        })
    }
}
