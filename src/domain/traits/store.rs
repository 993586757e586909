use async_trait::async_trait;
use crate::domain::entities::User;
use crate::application::errors::StorageError;

/// Store trait - persistence of per-user preferences
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Stored city, empty when unset
    async fn get_city(&self, user_id: i64) -> Result<String, StorageError>;
    async fn create_user(&self, user_id: i64) -> Result<(), StorageError>;
    async fn update_city(&self, user_id: i64, city: &str) -> Result<(), StorageError>;
    /// `Ok(None)` when no such user exists
    async fn get_user(&self, user_id: i64) -> Result<Option<User>, StorageError>;
    /// Connectivity check
    async fn ping(&self) -> Result<(), StorageError>;
}
