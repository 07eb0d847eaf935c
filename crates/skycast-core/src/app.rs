use anyhow::Result;
use std::sync::Arc;

use crate::Config;

/// Main application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        let config = Arc::new(config);

        Ok(Self { config })
    }

    /// Initialize the application
    pub fn initialize(&mut self) -> Result<()> {
        let validation = self.config.validate();

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        tracing::info!("Application initialized successfully");
        Ok(())
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a shared handle to the application config
    pub fn shared_config(&self) -> Arc<Config> {
        self.config.clone()
    }
}
