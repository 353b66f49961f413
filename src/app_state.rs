/// Application state

use crate::config::ServiceConfig;
use crate::infra::sqlite::Storage;

#[derive(Clone)]
pub struct AppState {
    pub service_config: ServiceConfig,
    pub storage: Storage,
}

impl AppState {
    pub fn new(service_config: ServiceConfig, storage: Storage) -> Self {
        Self {
            service_config,
            storage,
        }
    }
}
