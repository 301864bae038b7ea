use crate::domain::model::Domain;
use crate::domain::ports::{AvailabilityProber, ConfigProvider};
use crate::utils::error::{CartError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// `GET {endpoint}?domain=<domain>` returning `{"available": bool}`.
///
/// One request per call; transport errors, non-2xx responses and bodies
/// without a boolean `available` all become [`CartError::ProbeFailure`].
#[derive(Debug, Clone)]
pub struct HttpAvailabilityProber {
    client: Client,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    available: bool,
}

impl HttpAvailabilityProber {
    pub fn new(endpoint: &str, timeout_seconds: Option<u64>) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| CartError::InvalidConfigValueError {
            field: "endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let mut builder = Client::builder();
        if let Some(seconds) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        Ok(Self { client, endpoint })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.endpoint(), config.timeout_seconds())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn probe_failure(domain: &Domain, message: String) -> CartError {
    CartError::ProbeFailure {
        domain: domain.to_string(),
        message,
    }
}

#[async_trait]
impl AvailabilityProber for HttpAvailabilityProber {
    async fn probe(&self, domain: &Domain) -> Result<bool> {
        tracing::debug!("Checking availability of {} at {}", domain, self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("domain", domain.as_str())])
            .send()
            .await
            .map_err(|e| probe_failure(domain, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!("Availability response status for {}: {}", domain, status);
        if !status.is_success() {
            return Err(probe_failure(domain, format!("Unexpected HTTP status {}", status)));
        }

        let body: CheckResponse = response
            .json()
            .await
            .map_err(|e| probe_failure(domain, format!("Malformed response: {}", e)))?;

        Ok(body.available)
    }
}
