//! Client for the UserService

use crate::proto::services::v1::user_service_client::UserServiceClient;
use tonic::transport::Channel;

/// A configured gRPC client for the user-profile backend.
#[derive(Clone)]
pub struct UserClient {
    channel: Channel,
}

impl UserClient {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    pub fn user(&self) -> UserServiceClient<Channel> {
        UserServiceClient::new(self.channel.clone())
    }
}
