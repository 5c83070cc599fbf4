//! Read-only aggregations over group snapshots: the numbers behind the
//! reports screen and the all-groups CSV export.

use crate::constants::{CSV_HEADER, GATHERING_DATE_FORMAT, UNKNOWN_PAYER_NAME};
use crate::error::JuntappError;
use crate::models::{Category, Group, Party};

/// Amount totals bucketed by expense description, in first-seen order.
pub fn distribution_by_description(group: &Group) -> Vec<(String, f64)> {
    let mut buckets: Vec<(String, f64)> = Vec::new();
    for expense in &group.expenses {
        match buckets.iter_mut().find(|(desc, _)| *desc == expense.description) {
            Some((_, total)) => *total += expense.amount,
            None => buckets.push((expense.description.clone(), expense.amount)),
        }
    }
    buckets
}

/// Amount totals bucketed by category, in first-seen order.
pub fn distribution_by_category(group: &Group) -> Vec<(Category, f64)> {
    let mut buckets: Vec<(Category, f64)> = Vec::new();
    for expense in &group.expenses {
        match buckets.iter_mut().find(|(cat, _)| *cat == expense.category) {
            Some((_, total)) => *total += expense.amount,
            None => buckets.push((expense.category, expense.amount)),
        }
    }
    buckets
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemberSpending {
    pub member: Party,
    pub paid: f64,
}

/// Total paid per member, in member order. Expenses whose payer was deleted
/// count toward nobody.
pub fn member_spending(group: &Group) -> Vec<MemberSpending> {
    group
        .members
        .iter()
        .map(|member| MemberSpending {
            member: Party::from(member),
            paid: group
                .expenses
                .iter()
                .filter(|e| e.payer.member_id() == Some(member.id))
                .map(|e| e.amount)
                .sum(),
        })
        .collect()
}

/// The settings-screen export: one row per expense across every group, with
/// a placeholder row for groups that have none.
pub fn export_csv(groups: &[Group]) -> Result<String, JuntappError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| JuntappError::CsvExport(e.to_string()))?;

    for group in groups {
        let created = group.created_at.format("%d/%m/%Y").to_string();
        let gathering = group
            .gathering_date
            .map(|d| d.format(GATHERING_DATE_FORMAT).to_string())
            .unwrap_or_else(|| "N/A".to_string());

        if group.expenses.is_empty() {
            writer
                .write_record([
                    group.name.as_str(),
                    "N/A",
                    "N/A",
                    "0.00",
                    "N/A",
                    "N/A",
                    "0.00",
                    created.as_str(),
                    gathering.as_str(),
                ])
                .map_err(|e| JuntappError::CsvExport(e.to_string()))?;
            continue;
        }

        for expense in &group.expenses {
            let payer_name = expense.payer_name(&group.members);
            let participants = expense
                .participants
                .iter()
                .map(|&id| {
                    group
                        .member(id)
                        .map(|m| m.name.clone())
                        .unwrap_or_else(|| UNKNOWN_PAYER_NAME.to_string())
                })
                .collect::<Vec<_>>()
                .join(";");
            let individual_share = expense
                .shares
                .first()
                .map(|s| format!("{:.2}", s.share))
                .unwrap_or_else(|| "0.00".to_string());

            writer
                .write_record([
                    group.name.as_str(),
                    payer_name.as_str(),
                    expense.description.as_str(),
                    format!("{:.2}", expense.amount).as_str(),
                    payer_name.as_str(),
                    participants.as_str(),
                    individual_share.as_str(),
                    created.as_str(),
                    gathering.as_str(),
                ])
                .map_err(|e| JuntappError::CsvExport(e.to_string()))?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| JuntappError::CsvExport(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| JuntappError::CsvExport(e.to_string()))
}
