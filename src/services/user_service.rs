//! Inspector accounts: credential checks for the token endpoint and the
//! create/delete operations behind the CLI.

use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::repositories::UserRepository;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::not_blank;

/// Returned for every failed login so callers cannot enumerate usernames.
pub const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";

/// Account fields as given on the command line, trimmed.
#[derive(Debug, Validate)]
pub struct NewUserInput {
    #[validate(
        custom(function = "not_blank"),
        length(max = 150, message = "Ensure this field has no more than 150 characters.")
    )]
    pub username: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this field has no more than 254 characters.")
    )]
    pub email: Option<String>,
}

#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Checks a username/password pair.
    ///
    /// Unknown users, wrong passwords and inactive accounts all produce the
    /// same `Unauthorized` error.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let Some(user) = self.repo.find_by_username(username).await? else {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !user.is_active || !verify_password(password, &user.password)? {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(user)
    }

    /// Creates an inspector account with a hashed password.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> AppResult<User> {
        let input = NewUserInput {
            username: username.trim().to_string(),
            password: password.to_string(),
            email: email.map(str::trim).filter(|e| !e.is_empty()).map(str::to_string),
        };
        input.validate()?;

        if self.repo.find_by_username(&input.username).await?.is_some() {
            return Err(AppError::duplicate("user", "username", &input.username));
        }

        let new_user = NewUser {
            password: hash_password(&input.password)?,
            username: input.username,
            email: input.email,
        };
        self.repo.create(new_user).await
    }

    /// Deletes an account and, by cascade, its inspections.
    pub async fn delete_user(&self, username: &str) -> AppResult<()> {
        match self.repo.delete_by_username(username).await? {
            0 => Err(AppError::not_found("user", "username", username)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::build_lazy_pool;

    // Validation fails before any query, so the pool never connects
    fn service() -> UserService {
        let pool = build_lazy_pool(&DatabaseConfig {
            url: "postgres://fiscalizo@127.0.0.1:1/fiscalizo".to_string(),
            connection_timeout: 1,
            ..Default::default()
        });
        UserService::new(UserRepository::new(pool))
    }

    fn field_errors(result: AppResult<User>) -> crate::error::FieldErrors {
        match result {
            Err(AppError::ValidationErrors { errors }) => errors,
            other => panic!("Expected ValidationErrors, got {:?}", other.map(|u| u.id)),
        }
    }

    #[test]
    fn test_input_rules() {
        let input = NewUserInput {
            username: "maria".to_string(),
            password: "s3cret".to_string(),
            email: Some("maria@gov.br".to_string()),
        };
        assert!(input.validate().is_ok());

        let input = NewUserInput {
            username: "m".repeat(151),
            password: String::new(),
            email: Some("@".to_string()),
        };
        let errors = input.validate().unwrap_err();
        let errors = errors.field_errors();
        assert!(errors.contains_key("username"));
        assert!(errors.contains_key("password"));
        assert_eq!(
            errors["email"][0].message.as_deref(),
            Some("Enter a valid email address.")
        );
    }

    #[tokio::test]
    async fn test_create_user_rejects_invalid_email_before_database() {
        let errors = field_errors(service().create_user("maria", "x", Some("@")).await);
        assert_eq!(errors["email"], vec!["Enter a valid email address."]);

        let errors = field_errors(service().create_user("maria", "x", Some("maria.gov.br")).await);
        assert!(errors.contains_key("email"));
    }

    #[tokio::test]
    async fn test_create_user_rejects_blank_fields() {
        let errors = field_errors(service().create_user("   ", "", None).await);
        assert_eq!(errors["username"], vec!["This field may not be blank."]);
        assert_eq!(errors["password"], vec!["This field may not be blank."]);
    }

    #[tokio::test]
    async fn test_blank_email_is_treated_as_absent() {
        // Passes validation, so the next step is the unreachable database
        let result = service().create_user("maria", "s3cret", Some("  ")).await;
        assert!(matches!(result, Err(AppError::ConnectionPool { .. })));
    }
}
