use crate::error::JuntappError;
use crate::models::Group;
use async_trait::async_trait;
use uuid::Uuid;

/// Durable key-value mapping from group id to its JSON-like record. The
/// on-disk format belongs to the implementation; the service only ever sees
/// whole `Group` snapshots.
#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn list_groups(&self) -> Result<Vec<Group>, JuntappError>;
    async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, JuntappError>;
    /// Insert-or-replace by id.
    async fn save_group(&self, group: Group) -> Result<(), JuntappError>;
    async fn delete_group(&self, group_id: Uuid) -> Result<(), JuntappError>;
    /// Drops every stored group.
    async fn clear(&self) -> Result<(), JuntappError>;
}

pub mod in_memory;
