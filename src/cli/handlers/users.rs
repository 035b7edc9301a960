//! `create-user` and `delete-user` command handlers

use crate::config::Settings;
use crate::db::establish_async_connection_pool;
use crate::error::AppResult;
use crate::repositories::UserRepository;
use crate::services::UserService;

pub struct UserCommandHandler {
    config: Settings,
}

impl UserCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    async fn service(&self) -> AppResult<UserService> {
        let pool = establish_async_connection_pool(&self.config.database).await?;
        Ok(UserService::new(UserRepository::new(pool)))
    }

    pub async fn create(&self, username: &str, password: &str, email: Option<&str>) -> AppResult<()> {
        let user = self
            .service()
            .await?
            .create_user(username, password, email)
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User created");
        println!("✓ Created user '{}' (id {})", user.username, user.id);
        Ok(())
    }

    /// Inspections registered by the user are removed with it.
    pub async fn delete(&self, username: &str) -> AppResult<()> {
        self.service().await?.delete_user(username).await?;

        tracing::info!(username = %username, "User deleted");
        println!("✓ Deleted user '{}'", username);
        Ok(())
    }
}
