//! Directory access trait used by the sync jobs.

use async_trait::async_trait;
use directory_client::{DirectoryClient, DirectoryError, NewUserPayload, RemoteUser};

/// Remote user directory.
///
/// Abstracted so jobs can run against the HTTP client or a test double.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch the user with the given external id.
    async fn fetch_user(&self, external_id: &str) -> Result<RemoteUser, DirectoryError>;

    /// Create a user. Returns the 2xx status on success.
    async fn add_user(&self, payload: &NewUserPayload) -> Result<u16, DirectoryError>;
}

#[async_trait]
impl UserDirectory for DirectoryClient {
    async fn fetch_user(&self, external_id: &str) -> Result<RemoteUser, DirectoryError> {
        self.get_user(external_id).await
    }

    async fn add_user(&self, payload: &NewUserPayload) -> Result<u16, DirectoryError> {
        DirectoryClient::add_user(self, payload).await
    }
}
