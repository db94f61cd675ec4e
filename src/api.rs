use crate::credentials::Credentials;
use crate::error::FetchError;
use crate::models::splunk::Inventory;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

const APPS_LOCAL_PATH: &str = "services/apps/local";

pub struct SplunkClient {
    credentials: Credentials,
    client: Client,
}

impl SplunkClient {
    /// Builds the shared HTTP client. With `verify_tls` off, self-signed and
    /// otherwise untrusted certificates on the management port are accepted.
    pub fn new(
        credentials: Credentials,
        verify_tls: bool,
        timeout: Option<Duration>,
    ) -> reqwest::Result<Self> {
        let mut builder = Client::builder().danger_accept_invalid_certs(!verify_tls);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            credentials,
            client: builder.build()?,
        })
    }

    /// Lists every app installed on `instance` with one authenticated GET.
    pub async fn installed_apps(&self, instance: &str) -> Result<Inventory, FetchError> {
        let url = apps_endpoint(instance)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .basic_auth(
                &self.credentials.username,
                Some(self.credentials.password.expose_secret()),
            )
            .query(&[("output_mode", "json"), ("count", "0")])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            error!("Splunk API Error {} from {}: {}", status, instance, text);
            return Err(FetchError::Status(status));
        }

        let text = response.text().await?;
        Ok(Inventory::from_feed(&text)?)
    }
}

fn apps_endpoint(instance: &str) -> Result<Url, FetchError> {
    // Ensure base doesn't end with slash for consistency
    let base = instance.trim().trim_end_matches('/');
    Url::parse(&format!("{}/{}", base, APPS_LOCAL_PATH))
        .map_err(|e| FetchError::InvalidUrl(instance.to_string(), e))
}
