//! Remote directory HTTP client.

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::DirectoryConfig;
use crate::error::DirectoryError;
use crate::types::{NewUserPayload, RemoteUser};

/// Client for reading and creating users in the remote directory.
#[derive(Clone)]
pub struct DirectoryClient {
    http: Client,
    config: DirectoryConfig,
}

impl DirectoryClient {
    /// Build a client for the configured directory.
    pub fn new(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DirectoryError::Http)?;

        Ok(Self { http, config })
    }

    /// Fetch one user.
    ///
    /// Only `200 OK` counts as success; any other status is returned as
    /// [`DirectoryError::Status`].
    pub async fn get_user(&self, id: &str) -> Result<RemoteUser, DirectoryError> {
        let url = self.config.user_url(id);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let user = serde_json::from_str(&body)?;
        Ok(user)
    }

    /// Create a user from a local contact. Returns the 2xx status received.
    pub async fn add_user(&self, payload: &NewUserPayload) -> Result<u16, DirectoryError> {
        let url = self.config.add_user_url();
        debug!("POST {} (contact {})", url, payload.contact_id);

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(status.as_u16())
    }

    /// Get the configuration.
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }
}

impl std::fmt::Debug for DirectoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryClient")
            .field("config", &self.config)
            .finish()
    }
}
