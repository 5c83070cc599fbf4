use crate::models::expense::Expense;
use crate::models::member::Member;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,
    pub created_at: DateTime<Utc>,
    pub gathering_date: Option<NaiveDate>,
    pub gathering_location: Option<String>,
}

impl Group {
    pub fn new(
        name: impl Into<String>,
        gathering_date: Option<NaiveDate>,
        gathering_location: Option<String>,
    ) -> Self {
        Group {
            id: Uuid::new_v4(),
            name: name.into(),
            members: Vec::new(),
            expenses: Vec::new(),
            created_at: Utc::now(),
            gathering_date,
            gathering_location,
        }
    }

    pub fn member(&self, member_id: Uuid) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }

    pub fn member_mut(&mut self, member_id: Uuid) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.id == member_id)
    }

    pub fn is_member(&self, member_id: Uuid) -> bool {
        self.member(member_id).is_some()
    }

    pub fn has_member_named(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.members
            .iter()
            .any(|m| m.name.to_lowercase() == lowered)
    }

    pub fn expense(&self, expense_id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == expense_id)
    }

    pub fn expense_mut(&mut self, expense_id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|e| e.id == expense_id)
    }
}
