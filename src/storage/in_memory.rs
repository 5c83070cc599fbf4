use crate::error::JuntappError;
use crate::models::Group;
use crate::storage::GroupStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

pub struct InMemoryStore {
    groups: Mutex<HashMap<Uuid, Group>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore {
            groups: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GroupStore for InMemoryStore {
    async fn list_groups(&self) -> Result<Vec<Group>, JuntappError> {
        let groups = self.groups.lock().await;
        let mut listed: Vec<Group> = groups.values().cloned().collect();
        // Stable listing order for callers that render the group list.
        listed.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(listed)
    }

    async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, JuntappError> {
        Ok(self.groups.lock().await.get(&group_id).cloned())
    }

    async fn save_group(&self, group: Group) -> Result<(), JuntappError> {
        self.groups.lock().await.insert(group.id, group);
        Ok(())
    }

    async fn delete_group(&self, group_id: Uuid) -> Result<(), JuntappError> {
        self.groups.lock().await.remove(&group_id);
        Ok(())
    }

    async fn clear(&self) -> Result<(), JuntappError> {
        self.groups.lock().await.clear();
        Ok(())
    }
}
