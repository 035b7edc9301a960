//! Merges CLI overrides into file-based configuration.
//!
//! Precedence, lowest first: configuration files, `FISCALIZO_*` variables,
//! global flags (`--verbose`/`--quiet`), then command flags.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
    environment: Environment,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings, environment: Environment) -> Self {
        Self {
            base_config,
            environment,
        }
    }

    /// Loads unvalidated settings honouring `--config` and `--env`.
    ///
    /// Validation is deferred to [`merge_cli_args`](Self::merge_cli_args) so a
    /// flag such as `--port` can repair a value the files got wrong.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(ref path) = cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        let environment = loader.environment();
        Ok(Self::new(loader.load_unvalidated()?, environment))
    }

    /// Applies CLI overrides and validates the result.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, JwtConfig};
    use clap::Parser;

    fn merger() -> ConfigurationMerger {
        let settings = Settings {
            database: DatabaseConfig {
                url: "postgres://localhost/fiscalizo".to_string(),
                ..Default::default()
            },
            jwt: JwtConfig {
                secret: "0123456789abcdef0123456789abcdef".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        ConfigurationMerger::new(settings, Environment::Test)
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        merger().merge_cli_args(&cli)
    }

    #[test]
    fn test_no_flags_keeps_base() {
        let merger = merger();
        let cli = Cli::try_parse_from(["fiscalizo-rs"]).unwrap();
        assert_eq!(&merger.merge_cli_args(&cli).unwrap(), merger.config());
        assert_eq!(merger.environment(), Environment::Test);
    }

    #[test]
    fn test_verbose_and_quiet() {
        assert_eq!(merge(&["fiscalizo-rs", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["fiscalizo-rs", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_serve_overrides() {
        let merged = merge(&["fiscalizo-rs", "serve", "--host", "0.0.0.0", "--port", "8080"]).unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let merged = merge(&["fiscalizo-rs", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_merged_result_is_validated() {
        let mut settings = merger().config().clone();
        settings.jwt.secret = "short".to_string();
        let cli = Cli::try_parse_from(["fiscalizo-rs", "migrate"]).unwrap();

        let err = ConfigurationMerger::new(settings, Environment::Test)
            .merge_cli_args(&cli)
            .unwrap_err();
        assert_eq!(err.key(), Some("jwt.secret"));
    }
}
