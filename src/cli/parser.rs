//! CLI argument parsing with clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Environment as AppEnvironment;

/// Registry of fiscalized agencies and their inspections
#[derive(Parser, Debug)]
#[command(name = "fiscalizo-rs")]
#[command(about = "Registry of fiscalized agencies and their inspections")]
#[command(long_about = "
fiscalizo-rs serves a JWT-protected REST API for registering fiscalized
agencies and the inspections carried out on them.

EXAMPLES:
    # Start the server with the layered configuration in ./config
    fiscalizo-rs

    # Bind to all interfaces on port 8080
    fiscalizo-rs serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    fiscalizo-rs --config /etc/fiscalizo/production.toml serve

    # Check configuration without starting the server
    fiscalizo-rs serve --dry-run

    # Apply, preview or revert migrations
    fiscalizo-rs migrate
    fiscalizo-rs migrate --dry-run
    fiscalizo-rs migrate --rollback 1

    # Manage inspector accounts
    FISCALIZO_USER_PASSWORD='s3cret' fiscalizo-rs create-user --username maria --email maria@gov.br
    fiscalizo-rs delete-user --username maria
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Load a single configuration file instead of the layered ./config directory
    #[arg(short, long, global = true, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Select the `{environment}.toml` layer (overrides FISCALIZO_APP_ENV)
    #[arg(short, long, global = true, value_enum)]
    pub env: Option<Environment>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override; wins over --verbose and --quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply, list or revert database migrations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Revert the last N applied migrations (1-100)
        #[arg(long, value_name = "STEPS", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
    /// Create an inspector account
    CreateUser {
        #[arg(long, value_parser = super::validation::validate_username)]
        username: String,

        /// Account password; falls back to FISCALIZO_USER_PASSWORD
        #[arg(long, env = "FISCALIZO_USER_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        email: Option<String>,
    },
    /// Delete an inspector account together with its inspections
    DeleteUser {
        #[arg(long, value_parser = super::validation::validate_username)]
        username: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for AppEnvironment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => AppEnvironment::Development,
            Environment::Test => AppEnvironment::Test,
            Environment::Staging => AppEnvironment::Staging,
            Environment::Production => AppEnvironment::Production,
        }
    }
}
