//! Server state management

use crate::config::ServerConfig;
use crate::registry::{InMemoryRegistry, RegistryStore};
use bv_repo::{CliGit, GitGateway};
use std::sync::Arc;

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    /// Repository and comparison registry
    pub registry: Arc<dyn RegistryStore>,

    /// Git gateway
    pub gateway: Arc<dyn GitGateway>,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Default wiring: in-memory registry and CLI git.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_dependencies(config, Arc::new(InMemoryRegistry::new()), Arc::new(CliGit::new()))
    }

    /// Custom wiring for tests and alternative stores.
    pub fn with_dependencies(
        config: ServerConfig,
        registry: Arc<dyn RegistryStore>,
        gateway: Arc<dyn GitGateway>,
    ) -> Self {
        Self {
            registry,
            gateway,
            config,
        }
    }
}
