use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Serialize)]
pub enum JuntappError {
    /// Group with given ID not found
    #[error("Group {0} not found")]
    GroupNotFound(Uuid),

    /// A group with the same name (ignoring case) already exists
    #[error("Group name \"{0}\" already taken")]
    GroupNameTaken(String),

    /// Member with given ID not found in the group
    #[error("Member {0} not found in group")]
    MemberNotFound(Uuid),

    /// A member with the same name (ignoring case) already exists in the group
    #[error("Member \"{0}\" already exists in group")]
    DuplicateMember(String),

    /// Expense with given ID not found in the group
    #[error("Expense {0} not found in group")]
    ExpenseNotFound(Uuid),

    /// Required text field is empty or exceeds its length limit
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Expense amount is not a positive finite number within the cap
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Gathering date is not a valid DD/MM/YYYY date
    #[error("Invalid gathering date \"{0}\", expected DD/MM/YYYY")]
    InvalidGatheringDate(String),

    /// Expense has no participants
    #[error("Expense must have at least one participant")]
    EmptyParticipants,

    /// Expense payer is not a member of the group
    #[error("Payer {0} is not a group member")]
    PayerNotMember(Uuid),

    /// A participant in the split is not a member of the group
    #[error("Participant {0} is not a group member")]
    ParticipantNotMember(Uuid),

    #[error("CSV export failed: {0}")]
    CsvExport(String),

    /// Group has no members to chart
    #[error("No balances available for group {0}")]
    NoBalancesAvailable(Uuid),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Audit log error: {0}")]
    AuditError(String),
}
