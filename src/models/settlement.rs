use crate::models::member::Member;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Snapshot of a group's money flow, as rendered on the summary card.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupTotals {
    pub total_spent: f64,
    /// Plain average over the member count, independent of participation.
    pub each_should_pay: f64,
    /// Positive = owed money, negative = owes money.
    pub balances: HashMap<Uuid, f64>,
}

impl GroupTotals {
    pub fn empty() -> Self {
        GroupTotals {
            total_spent: 0.0,
            each_should_pay: 0.0,
            balances: HashMap::new(),
        }
    }
}

/// One side of a suggested transfer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Party {
    pub id: Uuid,
    pub name: String,
}

impl From<&Member> for Party {
    fn from(member: &Member) -> Self {
        Party {
            id: member.id,
            name: member.name.clone(),
        }
    }
}

/// Instruction to move money from a debtor to a creditor.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transfer {
    pub from: Party,
    pub to: Party,
    pub amount: f64,
}

/// Outcome of the "Consecuencia para el Ratón" feature: the most indebted
/// pending member and their randomly drawn forfeit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MouseConsequence {
    pub member: Member,
    pub consequence: String,
}
