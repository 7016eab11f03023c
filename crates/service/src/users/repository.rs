use async_trait::async_trait;

use super::domain::{User, UserInput, UserPatch};
use crate::errors::ServiceError;

/// Persistence seam for user records.
/// The JSON file store is one implementation; any embedded store can replace it.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, ServiceError>;
    /// Assign a fresh id, store the record and return it.
    async fn create(&self, input: UserInput) -> Result<User, ServiceError>;
    /// Remove every record; returns how many were removed.
    async fn clear(&self) -> Result<usize, ServiceError>;
    async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>, ServiceError>;
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use crate::users::id::IdGenerator;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<Vec<User>>,
        ids: IdGenerator,
    }

    impl MockUserRepository {
        fn users(&self) -> MutexGuard<'_, Vec<User>> {
            self.users.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn list(&self) -> Result<Vec<User>, ServiceError> {
            Ok(self.users().clone())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<User>, ServiceError> {
            Ok(self.users().iter().find(|u| u.id == id).cloned())
        }

        async fn create(&self, input: UserInput) -> Result<User, ServiceError> {
            let user = User::from_input(self.ids.next_id(), input);
            self.users().push(user.clone());
            Ok(user)
        }

        async fn clear(&self) -> Result<usize, ServiceError> {
            Ok(std::mem::take(&mut *self.users()).len())
        }

        async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>, ServiceError> {
            let mut users = self.users();
            Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
                patch.apply_to(u);
                u.clone()
            }))
        }

        async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
            let mut users = self.users();
            let before = users.len();
            users.retain(|u| u.id != id);
            Ok(users.len() != before)
        }
    }
}
