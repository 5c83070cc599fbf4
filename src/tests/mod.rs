mod expense_tests;
mod report_tests;

use crate::logger::in_memory::InMemoryAuditLogger;
use crate::models::{Category, Expense, Group, Member, Payer};
use crate::service::JuntappService;
use crate::storage::in_memory::InMemoryStore;
use uuid::Uuid;

pub fn create_test_service() -> JuntappService<InMemoryStore, InMemoryAuditLogger> {
    let _ = env_logger::try_init();
    JuntappService::new(InMemoryStore::new(), InMemoryAuditLogger::new())
}

/// Group with the given members and no expenses; returns the member ids in
/// order.
pub fn group_with_members(names: &[&str]) -> (Group, Vec<Uuid>) {
    let mut group = Group::new("Asado de prueba", None, None);
    let ids = names
        .iter()
        .map(|name| {
            let member = Member::new(*name);
            let id = member.id;
            group.members.push(member);
            id
        })
        .collect();
    (group, ids)
}

pub fn expense(description: &str, amount: f64, payer: Payer, participants: &[Uuid]) -> Expense {
    Expense {
        id: Uuid::new_v4(),
        description: description.to_string(),
        amount,
        payer,
        category: Category::Comida,
        participants: participants.to_vec(),
        shares: Expense::equal_shares(amount, participants),
        receipt_image: None,
    }
}
