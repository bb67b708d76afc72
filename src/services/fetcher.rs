use crate::models::country::Country;
use reqwest::Client;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Endpoint returned HTTP {0}")]
    Status(u16),
    #[error("Failed to decode countries payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fetches the full country list from the configured endpoint.
///
/// One GET per call, no retries, no timeout beyond the transport default.
/// Either the whole decoded list comes back or an error does; partial
/// results are never surfaced.
pub struct CountryFetcher {
    client: Client,
    endpoint: String,
}

impl CountryFetcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch(&self) -> Result<Vec<Country>, FetchError> {
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let countries = decode_countries(&body)?;
        info!(count = countries.len(), "fetched country records");
        Ok(countries)
    }
}

/// Decodes the endpoint's JSON array. Order is kept as received; this system
/// imposes no ordering of its own.
pub fn decode_countries(body: &str) -> Result<Vec<Country>, serde_json::Error> {
    serde_json::from_str(body)
}
