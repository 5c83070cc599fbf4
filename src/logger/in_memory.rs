use crate::error::JuntappError;
use crate::logger::{AuditAction, AuditEntry, AuditLogger};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

pub struct InMemoryAuditLogger {
    entries: Mutex<Vec<AuditEntry>>,
}

impl InMemoryAuditLogger {
    pub fn new() -> Self {
        InMemoryAuditLogger {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryAuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogger for InMemoryAuditLogger {
    async fn log_action(
        &self,
        action: AuditAction,
        details: serde_json::Value,
        group_id: Option<Uuid>,
    ) -> Result<(), JuntappError> {
        let mut entries = self.entries.lock().await;
        entries.push(AuditEntry {
            id: Uuid::new_v4(),
            action,
            group_id,
            details,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<AuditEntry>, JuntappError> {
        Ok(self.entries.lock().await.clone())
    }
}
