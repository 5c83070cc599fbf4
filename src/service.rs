use crate::config::CONFIG;
use crate::constants::{GATHERING_DATE_FORMAT, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};
use crate::error::JuntappError;
use crate::logger::{AuditAction, AuditEntry, AuditLogger};
use crate::models::{
    Category, Expense, ExpenseShare, Group, GroupTotals, Member, MouseConsequence, Payer, Transfer,
};
use crate::settlement;
use crate::storage::GroupStore;
use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

/// Validated caller input for creating or replacing an expense. Shares are
/// always derived here as an equal split over the participants.
#[derive(Clone, Debug, Deserialize)]
pub struct ExpenseInput {
    pub description: String,
    pub amount: f64,
    pub payer_id: Uuid,
    pub category: Category,
    pub participants: Vec<Uuid>,
}

pub struct JuntappService<S: GroupStore, L: AuditLogger> {
    store: S,
    audit: L,
}

impl<S: GroupStore, L: AuditLogger> JuntappService<S, L> {
    pub fn new(store: S, audit: L) -> Self {
        info!("Initializing JuntappService");
        JuntappService { store, audit }
    }

    async fn log_and_audit(
        &self,
        action: AuditAction,
        details: serde_json::Value,
        group_id: Option<Uuid>,
    ) -> Result<(), JuntappError> {
        self.audit.log_action(action, details, group_id).await
    }

    fn validate_name(field: &str, value: &str) -> Result<(), JuntappError> {
        if value.trim().is_empty() {
            return Err(JuntappError::InvalidInput {
                field: field.to_string(),
                reason: format!("{} cannot be empty", field),
            });
        }
        if value.len() > MAX_NAME_LENGTH {
            return Err(JuntappError::InvalidInput {
                field: field.to_string(),
                reason: format!("{} cannot exceed {} characters", field, MAX_NAME_LENGTH),
            });
        }
        Ok(())
    }

    fn validate_amount(amount: f64) -> Result<(), JuntappError> {
        if !amount.is_finite() {
            return Err(JuntappError::InvalidAmount(
                "amount must be a finite number".to_string(),
            ));
        }
        if amount <= 0.0 {
            return Err(JuntappError::InvalidAmount(
                "amount must be greater than 0".to_string(),
            ));
        }
        if amount > CONFIG.max_expense_amount {
            return Err(JuntappError::InvalidAmount(format!(
                "amount cannot exceed {}",
                CONFIG.max_expense_amount
            )));
        }
        Ok(())
    }

    /// Empty input means "no gathering date"; anything else must parse as
    /// DD/MM/YYYY.
    fn parse_gathering_date(input: Option<&str>) -> Result<Option<NaiveDate>, JuntappError> {
        match input.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw, GATHERING_DATE_FORMAT)
                .map(Some)
                .map_err(|_| JuntappError::InvalidGatheringDate(raw.to_string())),
        }
    }

    async fn require_group(&self, group_id: Uuid) -> Result<Group, JuntappError> {
        self.store
            .get_group(group_id)
            .await?
            .ok_or(JuntappError::GroupNotFound(group_id))
    }

    async fn ensure_unique_group_name(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), JuntappError> {
        let lowered = name.to_lowercase();
        let taken = self
            .store
            .list_groups()
            .await?
            .iter()
            .any(|g| Some(g.id) != exclude && g.name.to_lowercase() == lowered);
        if taken {
            warn!("Group name \"{}\" already in use", name);
            return Err(JuntappError::GroupNameTaken(name.to_string()));
        }
        Ok(())
    }

    // GROUP MANAGEMENT

    pub async fn create_group(
        &self,
        name: &str,
        gathering_date: Option<&str>,
        gathering_location: Option<&str>,
    ) -> Result<Group, JuntappError> {
        info!("Creating group \"{}\"", name.trim());
        Self::validate_name("name", name)?;
        let gathering_date = Self::parse_gathering_date(gathering_date)?;
        self.ensure_unique_group_name(name.trim(), None).await?;

        let location = gathering_location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from);
        let group = Group::new(name.trim(), gathering_date, location);
        self.store.save_group(group.clone()).await?;
        debug!("Group created with ID: {}", group.id);

        self.log_and_audit(
            AuditAction::CreateGroup,
            json!({ "group_id": group.id, "name": group.name }),
            Some(group.id),
        )
        .await?;

        Ok(group)
    }

    pub async fn update_group_info(
        &self,
        group_id: Uuid,
        name: &str,
        gathering_date: Option<&str>,
        gathering_location: Option<&str>,
    ) -> Result<Group, JuntappError> {
        info!("Updating group {}", group_id);
        Self::validate_name("name", name)?;
        let gathering_date = Self::parse_gathering_date(gathering_date)?;
        self.ensure_unique_group_name(name.trim(), Some(group_id))
            .await?;

        let mut group = self.require_group(group_id).await?;
        group.name = name.trim().to_string();
        group.gathering_date = gathering_date;
        group.gathering_location = gathering_location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from);
        self.store.save_group(group.clone()).await?;

        self.log_and_audit(
            AuditAction::UpdateGroup,
            json!({ "group_id": group_id, "name": group.name }),
            Some(group_id),
        )
        .await?;

        Ok(group)
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, JuntappError> {
        self.store.list_groups().await
    }

    pub async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, JuntappError> {
        self.store.get_group(group_id).await
    }

    pub async fn delete_group(&self, group_id: Uuid) -> Result<(), JuntappError> {
        let group = self.require_group(group_id).await?;
        self.store.delete_group(group_id).await?;
        info!("Group {} deleted", group_id);

        self.log_and_audit(
            AuditAction::DeleteGroup,
            json!({ "group_id": group_id, "name": group.name }),
            Some(group_id),
        )
        .await?;
        Ok(())
    }

    /// Bulk reset from the settings screen: every group is dropped.
    pub async fn delete_all_groups(&self) -> Result<(), JuntappError> {
        let count = self.store.list_groups().await?.len();
        self.store.clear().await?;
        info!("All {} groups deleted", count);

        self.log_and_audit(AuditAction::DeleteAllGroups, json!({ "count": count }), None)
            .await?;
        Ok(())
    }

    // MEMBER MANAGEMENT

    pub async fn add_member(&self, group_id: Uuid, name: &str) -> Result<Member, JuntappError> {
        info!("Adding member \"{}\" to group {}", name.trim(), group_id);
        Self::validate_name("name", name)?;

        let mut group = self.require_group(group_id).await?;
        if group.has_member_named(name.trim()) {
            warn!("Member \"{}\" already in group {}", name.trim(), group_id);
            return Err(JuntappError::DuplicateMember(name.trim().to_string()));
        }

        let member = Member::new(name.trim());
        group.members.push(member.clone());
        self.store.save_group(group).await?;
        debug!("Member created with ID: {}", member.id);

        self.log_and_audit(
            AuditAction::AddMember,
            json!({ "group_id": group_id, "member_id": member.id, "name": member.name }),
            Some(group_id),
        )
        .await?;

        Ok(member)
    }

    /// Payer display names are resolved from the member list at read time,
    /// so a rename needs no expense rewrite.
    pub async fn rename_member(
        &self,
        group_id: Uuid,
        member_id: Uuid,
        new_name: &str,
    ) -> Result<Member, JuntappError> {
        info!("Renaming member {} in group {}", member_id, group_id);
        Self::validate_name("name", new_name)?;

        let mut group = self.require_group(group_id).await?;
        let member = group
            .member_mut(member_id)
            .ok_or(JuntappError::MemberNotFound(member_id))?;
        member.name = new_name.trim().to_string();
        let renamed = member.clone();
        self.store.save_group(group).await?;

        self.log_and_audit(
            AuditAction::RenameMember,
            json!({ "group_id": group_id, "member_id": member_id, "name": renamed.name }),
            Some(group_id),
        )
        .await?;

        Ok(renamed)
    }

    /// Expenses survive the member: anything they paid is repointed to the
    /// unknown payer, and their participation entries are dropped. Remaining
    /// shares are NOT re-split, so affected expenses may sum below their
    /// amount; the settlement engine tolerates that.
    pub async fn remove_member(&self, group_id: Uuid, member_id: Uuid) -> Result<(), JuntappError> {
        info!("Removing member {} from group {}", member_id, group_id);
        let mut group = self.require_group(group_id).await?;
        let member = group
            .member(member_id)
            .cloned()
            .ok_or(JuntappError::MemberNotFound(member_id))?;

        group.members.retain(|m| m.id != member_id);
        for expense in &mut group.expenses {
            if expense.payer == Payer::Member(member_id) {
                expense.payer = Payer::Unknown;
            }
            expense.participants.retain(|&id| id != member_id);
            expense.shares.retain(|s| s.member_id != member_id);
        }
        self.store.save_group(group).await?;

        self.log_and_audit(
            AuditAction::RemoveMember,
            json!({ "group_id": group_id, "member_id": member_id, "name": member.name }),
            Some(group_id),
        )
        .await?;
        Ok(())
    }

    /// Flips the member's paid flag and returns the new state.
    pub async fn toggle_member_paid(
        &self,
        group_id: Uuid,
        member_id: Uuid,
    ) -> Result<bool, JuntappError> {
        let mut group = self.require_group(group_id).await?;
        let member = group
            .member_mut(member_id)
            .ok_or(JuntappError::MemberNotFound(member_id))?;
        member.has_paid = !member.has_paid;
        let has_paid = member.has_paid;
        self.store.save_group(group).await?;
        debug!(
            "Member {} in group {} marked has_paid={}",
            member_id, group_id, has_paid
        );

        self.log_and_audit(
            AuditAction::TogglePaidStatus,
            json!({ "group_id": group_id, "member_id": member_id, "has_paid": has_paid }),
            Some(group_id),
        )
        .await?;

        Ok(has_paid)
    }

    // EXPENSE MANAGEMENT

    fn validate_expense(group: &Group, input: &ExpenseInput) -> Result<(), JuntappError> {
        if input.description.trim().is_empty() {
            return Err(JuntappError::InvalidInput {
                field: "description".to_string(),
                reason: "description cannot be empty".to_string(),
            });
        }
        if input.description.len() > MAX_DESCRIPTION_LENGTH {
            return Err(JuntappError::InvalidInput {
                field: "description".to_string(),
                reason: format!(
                    "description cannot exceed {} characters",
                    MAX_DESCRIPTION_LENGTH
                ),
            });
        }
        Self::validate_amount(input.amount)?;
        if input.participants.is_empty() {
            return Err(JuntappError::EmptyParticipants);
        }
        if !group.is_member(input.payer_id) {
            return Err(JuntappError::PayerNotMember(input.payer_id));
        }
        for &participant_id in &input.participants {
            if !group.is_member(participant_id) {
                return Err(JuntappError::ParticipantNotMember(participant_id));
            }
        }
        Ok(())
    }

    fn build_shares(input: &ExpenseInput) -> Vec<ExpenseShare> {
        Expense::equal_shares(input.amount, &input.participants)
    }

    pub async fn add_expense(
        &self,
        group_id: Uuid,
        input: ExpenseInput,
    ) -> Result<Expense, JuntappError> {
        info!(
            "Adding expense \"{}\" ({}) to group {}",
            input.description.trim(),
            input.amount,
            group_id
        );
        let mut group = self.require_group(group_id).await?;
        Self::validate_expense(&group, &input)?;

        let expense = Expense {
            id: Uuid::new_v4(),
            description: input.description.trim().to_string(),
            amount: input.amount,
            payer: Payer::Member(input.payer_id),
            category: input.category,
            shares: Self::build_shares(&input),
            participants: input.participants,
            receipt_image: None,
        };
        group.expenses.push(expense.clone());
        self.store.save_group(group).await?;
        debug!("Expense created with ID: {}", expense.id);

        self.log_and_audit(
            AuditAction::AddExpense,
            json!({
                "group_id": group_id,
                "expense_id": expense.id,
                "description": expense.description,
                "amount": expense.amount,
                "payer_id": input.payer_id,
            }),
            Some(group_id),
        )
        .await?;

        Ok(expense)
    }

    pub async fn update_expense(
        &self,
        group_id: Uuid,
        expense_id: Uuid,
        input: ExpenseInput,
    ) -> Result<Expense, JuntappError> {
        info!("Updating expense {} in group {}", expense_id, group_id);
        let mut group = self.require_group(group_id).await?;
        Self::validate_expense(&group, &input)?;

        let shares = Self::build_shares(&input);
        let expense = group
            .expense_mut(expense_id)
            .ok_or(JuntappError::ExpenseNotFound(expense_id))?;
        expense.description = input.description.trim().to_string();
        expense.amount = input.amount;
        expense.payer = Payer::Member(input.payer_id);
        expense.category = input.category;
        expense.participants = input.participants;
        expense.shares = shares;
        let updated = expense.clone();
        self.store.save_group(group).await?;

        self.log_and_audit(
            AuditAction::UpdateExpense,
            json!({
                "group_id": group_id,
                "expense_id": expense_id,
                "description": updated.description,
                "amount": updated.amount,
            }),
            Some(group_id),
        )
        .await?;

        Ok(updated)
    }

    pub async fn remove_expense(
        &self,
        group_id: Uuid,
        expense_id: Uuid,
    ) -> Result<(), JuntappError> {
        let mut group = self.require_group(group_id).await?;
        if group.expense(expense_id).is_none() {
            return Err(JuntappError::ExpenseNotFound(expense_id));
        }
        group.expenses.retain(|e| e.id != expense_id);
        self.store.save_group(group).await?;
        info!("Expense {} removed from group {}", expense_id, group_id);

        self.log_and_audit(
            AuditAction::RemoveExpense,
            json!({ "group_id": group_id, "expense_id": expense_id }),
            Some(group_id),
        )
        .await?;
        Ok(())
    }

    /// Stores or replaces the base64 receipt photo on an expense.
    pub async fn attach_receipt(
        &self,
        group_id: Uuid,
        expense_id: Uuid,
        image: String,
    ) -> Result<(), JuntappError> {
        let mut group = self.require_group(group_id).await?;
        let expense = group
            .expense_mut(expense_id)
            .ok_or(JuntappError::ExpenseNotFound(expense_id))?;
        expense.receipt_image = Some(image);
        self.store.save_group(group).await?;

        self.log_and_audit(
            AuditAction::AttachReceipt,
            json!({ "group_id": group_id, "expense_id": expense_id }),
            Some(group_id),
        )
        .await?;
        Ok(())
    }

    // SETTLEMENT

    pub async fn summary(&self, group_id: Uuid) -> Result<GroupTotals, JuntappError> {
        let group = self.require_group(group_id).await?;
        let totals = settlement::compute_totals(&group);
        debug!(
            "Group {} total_spent={} over {} members",
            group_id,
            totals.total_spent,
            group.members.len()
        );
        Ok(totals)
    }

    pub async fn settlement_plan(&self, group_id: Uuid) -> Result<Vec<Transfer>, JuntappError> {
        let group = self.require_group(group_id).await?;
        let totals = settlement::compute_totals(&group);
        let transfers = settlement::compute_transfers(&group, &totals.balances);
        debug!(
            "Group {} settles with {} transfers",
            group_id,
            transfers.len()
        );
        Ok(transfers)
    }

    // PICKER FEATURES

    /// "¿Quién paga hoy?": a uniform draw over the group's members.
    pub async fn pick_random_payer(&self, group_id: Uuid) -> Result<Option<Member>, JuntappError> {
        let group = self.require_group(group_id).await?;
        let picked = {
            let mut rng = rand::thread_rng();
            settlement::pick_random_recipient(&mut rng, &group.members).cloned()
        };
        Ok(picked)
    }

    /// "Consecuencia para el Ratón": the most indebted pending member draws
    /// a random forfeit. `None` when nobody qualifies.
    pub async fn consequence_for_mouse(
        &self,
        group_id: Uuid,
    ) -> Result<Option<MouseConsequence>, JuntappError> {
        let group = self.require_group(group_id).await?;
        let totals = settlement::compute_totals(&group);
        let result = {
            let mut rng = rand::thread_rng();
            settlement::find_mouse(&group, &totals.balances).map(|mouse| MouseConsequence {
                member: mouse.clone(),
                consequence: settlement::pick_consequence(&mut rng).to_string(),
            })
        };
        Ok(result)
    }

    pub async fn audit_entries(&self) -> Result<Vec<AuditEntry>, JuntappError> {
        self.audit.entries().await
    }
}
