//! Client for the StorageService

use crate::proto::services::v1::storage_service_client::StorageServiceClient;
use tonic::transport::Channel;

/// A configured gRPC client for the file-storage backend.
#[derive(Clone)]
pub struct StorageClient {
    channel: Channel,
}

impl StorageClient {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    pub fn storage(&self) -> StorageServiceClient<Channel> {
        StorageServiceClient::new(self.channel.clone())
    }
}
