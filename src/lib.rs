use parking_lot::RwLock;

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

use services::session::DatasetSession;

// Application state
pub struct AppState {
    pub config: config::Config,
    pub session: RwLock<DatasetSession>,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self {
            config,
            session: RwLock::new(DatasetSession::new()),
        }
    }
}
