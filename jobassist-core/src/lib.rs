//! Jobassist Core - identity and session logic for the Job Application Assistant
//!
//! This crate implements the core logic following hexagonal architecture:
//!
//! - **domain**: Core entities (Identity) and error types
//! - **ports**: Trait definitions for external dependencies (KeyValueStore)
//! - **services**: Business logic orchestration (auth, status, doctor, logging)
//! - **adapters**: Concrete implementations (JSON files, in-memory)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::json_file::JsonFileStore;
use config::Config;
use ports::KeyValueStore;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::Identity;
pub use services::auth::{SESSION_KEY, USERS_KEY};
pub use services::{AuthService, Latency, LogEntry, LogEvent, LoggingService};

/// Main context for assistant operations
///
/// This is the primary entry point for callers. It holds the storage
/// adapter, configuration, and all services.
pub struct AppContext {
    pub config: Config,
    pub store: Arc<JsonFileStore>,
    pub auth_service: AuthService,
    pub status_service: StatusService,
    pub doctor_service: DoctorService,
}

impl AppContext {
    /// Create a new context rooted at `app_dir`
    pub fn new(app_dir: &Path) -> Result<Self> {
        let config = Config::load(app_dir)?;
        let store = Arc::new(JsonFileStore::new(app_dir)?);
        let kv: Arc<dyn KeyValueStore> = store.clone();

        let auth_service = AuthService::new(kv.clone(), config.latency());
        let status_service = StatusService::new(kv.clone());
        let doctor_service = DoctorService::new(kv);

        Ok(Self {
            config,
            store,
            auth_service,
            status_service,
            doctor_service,
        })
    }
}
