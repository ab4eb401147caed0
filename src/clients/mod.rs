//! gRPC clients for the backend services.
//!
//! One long-lived channel per backend, built once at startup from the
//! environment-provided endpoints and handed to the router inside the
//! application context. Channels are lazy: the gateway comes up even when a
//! backend is still starting, and the first RPC on it reports the transport
//! failure instead.

mod auth;
mod election;
mod storage;
mod user;

pub use auth::AuthClient;
pub use election::ElectionClient;
pub use storage::StorageClient;
pub use user::UserClient;

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};

use crate::config::Config;

fn lazy_channel(uri: String, timeout_secs: u64) -> Result<Channel, tonic::transport::Error> {
    Ok(Endpoint::from_shared(uri)?
        .timeout(Duration::from_secs(timeout_secs))
        .connect_lazy())
}

/// The full client set, one per backend.
#[derive(Clone)]
pub struct BackendClients {
    pub auth: AuthClient,
    pub user: UserClient,
    pub election: ElectionClient,
    pub storage: StorageClient,
}

impl BackendClients {
    pub fn from_config(config: &Config) -> Result<Self, tonic::transport::Error> {
        Ok(BackendClients {
            auth: AuthClient::new(lazy_channel(
                config.auth.uri(),
                config.backend_timeout_secs,
            )?),
            user: UserClient::new(lazy_channel(
                config.user.uri(),
                config.backend_timeout_secs,
            )?),
            election: ElectionClient::new(lazy_channel(
                config.election.uri(),
                config.backend_timeout_secs,
            )?),
            // Uploads hold the stream open for the whole transfer, so the
            // storage channel gets the wider deadline.
            storage: StorageClient::new(lazy_channel(
                config.storage.uri(),
                config.upload_timeout_secs,
            )?),
        })
    }
}
