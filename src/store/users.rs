use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::StoreError;

/// Public view of a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn register(&self, email: String) -> Result<User, StoreError>;

    async fn list(&self) -> Result<Vec<User>, StoreError>;
}

/// In-memory user registry. Passwords are validated but never stored.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn register(&self, email: String) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        let id = u64::try_from(users.len())
            .ok()
            .and_then(|count| count.checked_add(1))
            .ok_or(StoreError::IdOverflow("users"))?;

        let user = User { id, email };
        users.push(user.clone());

        tracing::debug!("Registered user {}", id);
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }
}
