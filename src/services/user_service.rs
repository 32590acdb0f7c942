//! User account management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Password, UpdateUser, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(&self) -> AppResult<Vec<User>>;

    async fn get_user(&self, id: i64) -> AppResult<User>;

    async fn get_by_username(&self, username: &str) -> AppResult<User>;

    /// Replace a user's profile and role; `password` is only changed when
    /// given.
    async fn update_user(
        &self,
        id: i64,
        update: UpdateUser,
        password: Option<String>,
    ) -> AppResult<User>;

    /// Delete `id` on behalf of `acting_user_id`; nobody can delete
    /// themselves.
    async fn delete_user(&self, id: i64, acting_user_id: i64) -> AppResult<()>;
}

pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found(|| format!("User not found with id: {}", id))
    }

    async fn get_by_username(&self, username: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or_not_found(|| format!("User not found: {}", username))
    }

    async fn update_user(
        &self,
        id: i64,
        mut update: UpdateUser,
        password: Option<String>,
    ) -> AppResult<User> {
        let existing = self.get_user(id).await?;

        if update.username != existing.username
            && self.uow.users().exists_by_username(&update.username).await?
        {
            return Err(AppError::conflict(format!(
                "User with username '{}' already exists",
                update.username
            )));
        }

        if let Some(password) = password {
            update.password_hash = Some(Password::new(&password)?.into_string());
        }

        let user = self.uow.users().update(id, update).await?;
        tracing::info!(user_id = id, role = %user.role, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: i64, acting_user_id: i64) -> AppResult<()> {
        if id == acting_user_id {
            return Err(AppError::validation("You cannot delete your own account."));
        }

        self.uow.users().delete(id).await?;
        tracing::info!(user_id = id, deleted_by = acting_user_id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::services::testing::MockRepos;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn user(id: i64, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            password_hash: "hashed".to_string(),
            first_name: Some("Test".to_string()),
            last_name: None,
            role: Role::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn update(username: &str) -> UpdateUser {
        UpdateUser {
            username: username.to_string(),
            password_hash: None,
            first_name: None,
            last_name: None,
            role: Role::Admin,
        }
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repos = MockRepos::default();
        repos
            .users
            .expect_find_by_id()
            .with(eq(9))
            .returning(|_| Ok(None));

        let service = UserManager::new(repos.into_uow());
        let err = service.get_user(9).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref m) if m == "User not found with id: 9"));
    }

    #[tokio::test]
    async fn test_list_users() {
        let mut repos = MockRepos::default();
        repos
            .users
            .expect_list()
            .returning(|| Ok(vec![user(1, "a"), user(2, "b")]));

        let service = UserManager::new(repos.into_uow());
        assert_eq!(service.list_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_rejects_taken_username() {
        let mut repos = MockRepos::default();
        repos
            .users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "original"))));
        repos
            .users
            .expect_exists_by_username()
            .returning(|_| Ok(true));
        repos.users.expect_update().never();

        let service = UserManager::new(repos.into_uow());
        let err = service
            .update_user(1, update("taken"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_own_username_and_hashes_new_password() {
        let mut repos = MockRepos::default();
        repos
            .users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "original"))));
        repos.users.expect_exists_by_username().never();
        repos
            .users
            .expect_update()
            .withf(|id, u| {
                *id == 1
                    && u.role == Role::Admin
                    && u.password_hash.as_deref().is_some_and(|h| h.starts_with("$argon2"))
            })
            .returning(|id, u| {
                let mut updated = user(id, &u.username);
                updated.role = u.role;
                Ok(updated)
            });

        let service = UserManager::new(repos.into_uow());
        let updated = service
            .update_user(1, update("original"), Some("new-password-1".to_string()))
            .await
            .unwrap();

        assert_eq!(updated.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_delete_self_rejected() {
        let mut repos = MockRepos::default();
        repos.users.expect_delete().never();

        let service = UserManager::new(repos.into_uow());
        let err = service.delete_user(3, 3).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let mut repos = MockRepos::default();
        repos
            .users
            .expect_delete()
            .with(eq(5))
            .returning(|id| Err(AppError::not_found(format!("User not found with id: {}", id))));

        let service = UserManager::new(repos.into_uow());
        assert!(matches!(
            service.delete_user(5, 1).await,
            Err(AppError::NotFound(_))
        ));
    }
}
