use std::sync::Arc;

use crate::clients::BackendClients;
use crate::config::Config;

/// Shared application context, injected into every handler via axum state.
/// Holds no mutable gateway-side state; everything durable lives in the
/// backends.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub clients: BackendClients,
}

impl AppContext {
    pub fn new(config: Arc<Config>, clients: BackendClients) -> Self {
        AppContext { config, clients }
    }
}
