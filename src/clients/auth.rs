//! Client for the AuthService

use crate::proto::services::v1::auth_service_client::AuthServiceClient;
use tonic::transport::Channel;

/// A configured gRPC client for the AuthService.
#[derive(Clone)]
pub struct AuthClient {
    channel: Channel,
}

impl AuthClient {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    /// Gets a client for the AuthService.
    pub fn auth(&self) -> AuthServiceClient<Channel> {
        AuthServiceClient::new(self.channel.clone())
    }
}
