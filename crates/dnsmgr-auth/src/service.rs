//! Account service: registration, authentication and activation.

use dnsmgr_core::error::{DnsMgrError, DnsMgrResult};
use dnsmgr_core::models::user::{CreateUser, UpdateUser, User};
use dnsmgr_core::repository::UserRepository;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;

/// Account service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
pub struct AccountService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AccountService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    /// Create a new, inactive account after checking password policy.
    pub async fn register(&self, email: String, password: String) -> DnsMgrResult<User> {
        password::check_policy(&password, self.config.min_password_length)?;

        let user = self
            .user_repo
            .create(CreateUser {
                email,
                password,
                is_active: None,
            })
            .await?;

        info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    /// Check an email + password pair and return the account.
    ///
    /// Unknown emails and wrong passwords both yield
    /// `AuthenticationFailed` with the same reason. The active flag is
    /// only consulted once the password has verified.
    pub async fn authenticate(&self, email: &str, password: &str) -> DnsMgrResult<User> {
        let user = match self.user_repo.get_by_email(email).await {
            Ok(u) => u,
            Err(DnsMgrError::NotFound { .. }) => return Err(AuthError::InvalidCredentials.into()),
            Err(e) => return Err(e),
        };

        let valid = password::verify_password(
            password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;

        if !valid {
            warn!(user_id = %user.id, "Rejected login: bad password");
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            warn!(user_id = %user.id, "Rejected login: account inactive");
            return Err(AuthError::AccountInactive.into());
        }

        Ok(user)
    }

    pub async fn activate(&self, user_id: Uuid) -> DnsMgrResult<User> {
        self.set_active(user_id, true).await
    }

    pub async fn deactivate(&self, user_id: Uuid) -> DnsMgrResult<User> {
        self.set_active(user_id, false).await
    }

    /// Replace a password after verifying the current one.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current: &str,
        new: String,
    ) -> DnsMgrResult<User> {
        let user = self.user_repo.get_by_id(user_id).await?;

        let valid =
            password::verify_password(current, &user.password_hash, self.config.pepper.as_deref())?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }
        password::check_policy(&new, self.config.min_password_length)?;

        let user = self
            .user_repo
            .update(
                user_id,
                UpdateUser {
                    password: Some(new),
                    ..Default::default()
                },
            )
            .await?;

        info!(user_id = %user_id, "Changed password");
        Ok(user)
    }

    async fn set_active(&self, user_id: Uuid, is_active: bool) -> DnsMgrResult<User> {
        let user = self
            .user_repo
            .update(
                user_id,
                UpdateUser {
                    is_active: Some(is_active),
                    ..Default::default()
                },
            )
            .await?;

        info!(user_id = %user_id, is_active, "Changed account state");
        Ok(user)
    }
}
