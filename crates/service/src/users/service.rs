use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{User, UserInput, UserPatch};
use super::repository::UserRepository;
use crate::errors::ServiceError;

/// User business service independent of web framework.
///
/// Every "nothing to act on" outcome surfaces as [`ServiceError::NotFound`];
/// the HTTP layer picks the wording.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self { Self { repo } }

    /// All users, or `NotFound` when the collection is empty.
    ///
    /// # Examples
    /// ```
    /// use service::users::{UserService, repository::mock::MockUserRepository};
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(MockUserRepository::default()));
    /// let err = tokio_test::block_on(svc.list()).unwrap_err();
    /// assert!(err.is_not_found());
    /// ```
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<User>, ServiceError> {
        let users = self.repo.list().await?;
        if users.is_empty() {
            return Err(ServiceError::not_found("users"));
        }
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: UserInput) -> Result<User, ServiceError> {
        let user = self.repo.create(input).await?;
        info!(user_id = %user.id, "user_created");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<User, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("user"))
    }

    /// Remove every user; `NotFound` when there was nothing to remove.
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<usize, ServiceError> {
        let removed = self.repo.clear().await?;
        if removed == 0 {
            return Err(ServiceError::not_found("users"));
        }
        info!(removed, "all_users_deleted");
        Ok(removed)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("user"));
        }
        info!(user_id = %id, "user_deleted");
        Ok(())
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: UserPatch) -> Result<User, ServiceError> {
        if patch.is_empty() {
            debug!(user_id = %id, "update carries no recognized fields");
        }
        let user = self.repo.update(id, patch).await?.ok_or_else(|| ServiceError::not_found("user"))?;
        info!(user_id = %user.id, "user_updated");
        Ok(user)
    }
}
