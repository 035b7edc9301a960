//! Dispatches a parsed command to its handler.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler, UserCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::{Environment, Settings};

/// Runs the selected command; no subcommand means `serve`.
pub async fn execute_command(
    cli: &Cli,
    settings: Settings,
    environment: Environment,
) -> anyhow::Result<()> {
    match &cli.command {
        None => {
            ServeCommandHandler::new(settings, environment)
                .execute(false)
                .await
        }
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings, environment)
                .execute(*dry_run)
                .await
        }
        Some(Commands::Migrate { dry_run, rollback }) => {
            if let Some(steps) = rollback
                && *steps > 10
            {
                tracing::warn!(steps, "Large rollback requested");
            }
            Ok(MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await?)
        }
        Some(Commands::CreateUser {
            username,
            password,
            email,
        }) => Ok(UserCommandHandler::new(settings)
            .create(username, password, email.as_deref())
            .await?),
        Some(Commands::DeleteUser { username }) => {
            Ok(UserCommandHandler::new(settings).delete(username).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, JwtConfig};
    use clap::Parser;

    fn valid_config() -> Settings {
        Settings {
            database: DatabaseConfig {
                url: "postgres://localhost/fiscalizo".to_string(),
                ..Default::default()
            },
            jwt: JwtConfig {
                secret: "0123456789abcdef0123456789abcdef".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_serve_dry_run() {
        let cli = Cli::try_parse_from(["fiscalizo-rs", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, valid_config(), Environment::Test).await.is_ok());
    }

    #[tokio::test]
    async fn test_migrate_with_invalid_database_url_fails() {
        let cli = Cli::try_parse_from(["fiscalizo-rs", "migrate", "--dry-run"]).unwrap();
        let mut config = valid_config();
        config.database.url = String::new();
        assert!(execute_command(&cli, config, Environment::Test).await.is_err());
    }
}
