//! Serve command handler

use crate::config::{Environment, Settings};
use crate::error::AppResult;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// Runs the server, or only reports the effective configuration when
    /// `dry_run` is set.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            return Ok(self.validate_only()?);
        }
        Server::new(self.config, self.environment).run().await
    }

    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid ({} environment)", self.environment);
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Request timeout: {}s, CORS origins: {}",
            self.config.server.request_timeout,
            match self.config.server.cors_allowed_origins.len() {
                0 => "any".to_string(),
                n => n.to_string(),
            }
        );
        println!(
            "✓ Database pool: {}-{} connections, auto_migrate={}",
            self.config.database.min_connections,
            self.config.database.max_connections,
            self.config.database.auto_migrate
        );
        println!("✓ Logger level: {}", self.config.logger.level);
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
