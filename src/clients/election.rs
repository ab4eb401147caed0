//! Client for the ElectionService

use crate::proto::services::v1::election_service_client::ElectionServiceClient;
use tonic::transport::Channel;

/// A configured gRPC client for the election backend.
#[derive(Clone)]
pub struct ElectionClient {
    channel: Channel,
}

impl ElectionClient {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    pub fn election(&self) -> ElectionServiceClient<Channel> {
        ElectionServiceClient::new(self.channel.clone())
    }
}
