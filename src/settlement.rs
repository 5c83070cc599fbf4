//! Pure settlement computations over an in-memory `Group` snapshot.
//!
//! Nothing here mutates its input, touches storage, or fails: ids that no
//! longer resolve to a member (stale payers or participants left behind by a
//! deletion) are skipped rather than reported. Callers hand in a consistent
//! snapshot and render whatever comes back.

use crate::constants::{CONSEQUENCES, SETTLEMENT_TOLERANCE};
use crate::models::{Group, GroupTotals, Member, Party, Transfer};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use uuid::Uuid;

/// Total spent, the per-head average and every member's net balance.
///
/// A group with no members reports zero totals and no balances, even when
/// stale expenses are still attached.
pub fn compute_totals(group: &Group) -> GroupTotals {
    if group.members.is_empty() {
        return GroupTotals::empty();
    }

    let mut total_spent = 0.0;
    let mut paid: HashMap<Uuid, f64> = group.members.iter().map(|m| (m.id, 0.0)).collect();
    let mut owed: HashMap<Uuid, f64> = group.members.iter().map(|m| (m.id, 0.0)).collect();

    for expense in &group.expenses {
        total_spent += expense.amount;

        if let Some(payer_id) = expense.payer.member_id() {
            if let Some(amount_paid) = paid.get_mut(&payer_id) {
                *amount_paid += expense.amount;
            }
        }

        if !expense.shares.is_empty() {
            for entry in &expense.shares {
                if let Some(amount_owed) = owed.get_mut(&entry.member_id) {
                    *amount_owed += entry.share;
                }
            }
        } else if !expense.participants.is_empty() {
            // Legacy expenses stored before per-member shares existed.
            let share = expense.amount / expense.participants.len() as f64;
            for participant_id in &expense.participants {
                if let Some(amount_owed) = owed.get_mut(participant_id) {
                    *amount_owed += share;
                }
            }
        }
    }

    let balances = group
        .members
        .iter()
        .map(|m| (m.id, paid[&m.id] - owed[&m.id]))
        .collect();

    GroupTotals {
        total_spent,
        each_should_pay: total_spent / group.members.len() as f64,
        balances,
    }
}

struct PartyBalance {
    id: Uuid,
    name: String,
    amount: f64,
}

/// Greedy two-pointer matching of debtors against creditors.
///
/// Members flagged `has_paid` are excluded outright, whatever their balance.
/// Transfers at or below the tolerance are rounding dust and are not
/// emitted. The sort is stable, so equal balances keep member order.
pub fn compute_transfers(group: &Group, balances: &HashMap<Uuid, f64>) -> Vec<Transfer> {
    let mut debtors: Vec<PartyBalance> = Vec::new();
    let mut creditors: Vec<PartyBalance> = Vec::new();

    for member in group.members.iter().filter(|m| !m.has_paid) {
        let Some(&balance) = balances.get(&member.id) else {
            continue;
        };
        if balance < 0.0 {
            debtors.push(PartyBalance {
                id: member.id,
                name: member.name.clone(),
                amount: -balance,
            });
        } else if balance > 0.0 {
            creditors.push(PartyBalance {
                id: member.id,
                name: member.name.clone(),
                amount: balance,
            });
        }
    }

    debtors.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    creditors.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    let mut transfers = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].amount.min(creditors[j].amount);

        if amount > SETTLEMENT_TOLERANCE {
            transfers.push(Transfer {
                from: Party {
                    id: debtors[i].id,
                    name: debtors[i].name.clone(),
                },
                to: Party {
                    id: creditors[j].id,
                    name: creditors[j].name.clone(),
                },
                amount,
            });
            debtors[i].amount -= amount;
            creditors[j].amount -= amount;
        }

        if debtors[i].amount <= SETTLEMENT_TOLERANCE {
            i += 1;
        }
        if creditors[j].amount <= SETTLEMENT_TOLERANCE {
            j += 1;
        }
    }

    transfers
}

/// Uniform draw from `candidates`; `None` when the list is empty.
pub fn pick_random_recipient<'a, R: Rng + ?Sized>(
    rng: &mut R,
    candidates: &'a [Member],
) -> Option<&'a Member> {
    candidates.choose(rng)
}

/// The "ratón": the pending member carrying the most negative balance.
/// `None` when every debtor is settled, marked paid, or within tolerance.
pub fn find_mouse<'a>(group: &'a Group, balances: &HashMap<Uuid, f64>) -> Option<&'a Member> {
    group
        .members
        .iter()
        .filter(|m| !m.has_paid)
        .filter_map(|m| balances.get(&m.id).map(|&b| (m, b)))
        .filter(|(_, balance)| *balance < -SETTLEMENT_TOLERANCE)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(member, _)| member)
}

/// Uniform draw from the fixed forfeit list.
pub fn pick_consequence<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CONSEQUENCES[rng.gen_range(0..CONSEQUENCES.len())]
}
