use crate::error::JuntappError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AuditAction {
    CreateGroup,
    UpdateGroup,
    DeleteGroup,
    DeleteAllGroups,
    AddMember,
    RenameMember,
    RemoveMember,
    TogglePaidStatus,
    AddExpense,
    UpdateExpense,
    RemoveExpense,
    AttachReceipt,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub action: AuditAction,
    pub group_id: Option<Uuid>,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[async_trait]
pub trait AuditLogger: Send + Sync {
    async fn log_action(
        &self,
        action: AuditAction,
        details: serde_json::Value,
        group_id: Option<Uuid>,
    ) -> Result<(), JuntappError>;

    async fn entries(&self) -> Result<Vec<AuditEntry>, JuntappError>;
}

pub mod in_memory;
