//! Client for the remote user directory.
//!
//! The directory exposes two JSON resources:
//!
//! - `GET /users/{id}` returns one user
//! - `POST /users/add` creates a user
//!
//! # Example
//!
//! ```no_run
//! use directory_client::{DirectoryClient, DirectoryConfig};
//!
//! # async fn example() -> Result<(), directory_client::DirectoryError> {
//! let client = DirectoryClient::new(DirectoryConfig::default())?;
//! let user = client.get_user("42").await?;
//! println!("email: {:?}", user.email);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::DirectoryClient;
pub use config::DirectoryConfig;
pub use error::DirectoryError;
pub use types::{NewUserPayload, PostalCode, RemoteAddress, RemoteUser};
