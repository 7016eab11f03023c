use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tracing::info;

use super::domain::{User, UserInput, UserPatch};
use super::id::IdGenerator;
use super::repository::UserRepository;
use crate::errors::ServiceError;
use crate::storage::JsonDocumentStore;

pub const DEFAULT_COLLECTION: &str = "users";

/// File-backed user store: `{"users": [...]}` persisted on every write.
pub struct JsonUserStore {
    docs: Arc<JsonDocumentStore<User>>,
    ids: IdGenerator,
}

impl JsonUserStore {
    /// Load the store from `path`, creating `{"users": []}` if missing or empty.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        Self::open_collection(path, DEFAULT_COLLECTION).await
    }

    pub async fn open_collection<P: Into<PathBuf>>(path: P, collection: &str) -> Result<Arc<Self>, ServiceError> {
        let docs = JsonDocumentStore::<User>::open(path, collection).await?;
        let count = docs.len().await;
        info!(path = %docs.path().display(), users = count, "user store loaded");
        Ok(Arc::new(Self { docs, ids: IdGenerator::new() }))
    }

    pub async fn all(&self) -> Vec<User> {
        self.docs.all().await
    }

    pub async fn find_by_id(&self, id: &str) -> Option<User> {
        self.docs.find(|u| u.id == id).await
    }

    /// Append a fully formed record and persist.
    pub async fn append(&self, user: User) -> Result<(), ServiceError> {
        self.docs.push(user).await
    }

    /// Overwrite the whole collection; returns the records it replaced.
    pub async fn replace_all(&self, users: Vec<User>) -> Result<Vec<User>, ServiceError> {
        self.docs.replace_all(users).await
    }

    pub async fn update_fields(&self, id: &str, patch: UserPatch) -> Result<Option<User>, ServiceError> {
        self.docs.update_first(|u| u.id == id, move |u| patch.apply_to(u)).await
    }

    pub async fn remove_by_id(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(self.docs.remove_where(|u| u.id == id).await? > 0)
    }

    /// Id drawing and the uniqueness check happen under the write lock.
    async fn insert_new(&self, input: UserInput) -> Result<User, ServiceError> {
        let ids = &self.ids;
        self.docs
            .mutate(move |users| {
                let mut id = ids.next_id();
                while users.iter().any(|u| u.id == id) {
                    id = ids.next_id();
                }
                let user = User::from_input(id, input);
                users.push(user.clone());
                Ok(user)
            })
            .await
    }
}

#[async_trait]
impl UserRepository for JsonUserStore {
    async fn list(&self) -> Result<Vec<User>, ServiceError> { Ok(self.all().await) }
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, ServiceError> { Ok(JsonUserStore::find_by_id(self, id).await) }
    async fn create(&self, input: UserInput) -> Result<User, ServiceError> { self.insert_new(input).await }
    async fn clear(&self) -> Result<usize, ServiceError> { Ok(self.replace_all(Vec::new()).await?.len()) }
    async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>, ServiceError> { self.update_fields(id, patch).await }
    async fn delete(&self, id: &str) -> Result<bool, ServiceError> { self.remove_by_id(id).await }
}
