use std::sync::Arc;

use service::users::{repository::UserRepository, UserService};

/// Shared handler state, cloned into every request.
#[derive(Clone)]
pub struct ServerState {
    pub users: Arc<UserService>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { users: Arc::new(UserService::new(repo)) }
    }
}
