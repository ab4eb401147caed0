// Protobuf generated code for the backend services.
pub mod proto {
    pub mod services {
        pub mod v1 {
            #![allow(clippy::large_enum_variant)]
            tonic::include_proto!("election.services.v1");
        }
    }
}

pub mod clients;
pub mod config;
pub mod context;
pub mod cookies;
pub mod envelope;
pub mod error;
pub mod identity;
pub mod routes;
pub mod upload;
