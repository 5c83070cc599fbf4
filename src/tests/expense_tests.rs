use crate::error::JuntappError;
use crate::models::{Category, Member, Payer};
use crate::service::ExpenseInput;
use crate::tests::create_test_service;
use uuid::Uuid;

async fn seeded_group() -> (
    crate::service::JuntappService<crate::InMemoryStore, crate::InMemoryAuditLogger>,
    Uuid,
    Vec<Member>,
) {
    let service = create_test_service();
    let group = service.create_group("Asado", None, None).await.unwrap();
    let mut members = Vec::new();
    for name in ["Ana", "Bruno", "Carla"] {
        members.push(service.add_member(group.id, name).await.unwrap());
    }
    (service, group.id, members)
}

fn input(description: &str, amount: f64, payer_id: Uuid, participants: Vec<Uuid>) -> ExpenseInput {
    ExpenseInput {
        description: description.to_string(),
        amount,
        payer_id,
        category: Category::Comida,
        participants,
    }
}

#[tokio::test]
async fn add_expense_builds_equal_shares() {
    let (service, group_id, members) = seeded_group().await;
    let participants: Vec<Uuid> = members.iter().map(|m| m.id).collect();

    let expense = service
        .add_expense(group_id, input("Carne", 30.0, members[0].id, participants.clone()))
        .await
        .unwrap();

    assert_eq!(expense.payer, Payer::Member(members[0].id));
    assert_eq!(expense.shares.len(), 3);
    for share in &expense.shares {
        assert!((share.share - 10.0).abs() < 1e-9);
    }
    let share_sum: f64 = expense.shares.iter().map(|s| s.share).sum();
    assert!((share_sum - expense.amount).abs() < 1e-9);
    assert_eq!(expense.participants, participants);
}

#[tokio::test]
async fn expense_validation_rejects_bad_input() {
    let (service, group_id, members) = seeded_group().await;
    let all: Vec<Uuid> = members.iter().map(|m| m.id).collect();

    let blank = service
        .add_expense(group_id, input("   ", 10.0, members[0].id, all.clone()))
        .await;
    assert!(matches!(blank, Err(JuntappError::InvalidInput { .. })));

    let negative = service
        .add_expense(group_id, input("Carne", -5.0, members[0].id, all.clone()))
        .await;
    assert!(matches!(negative, Err(JuntappError::InvalidAmount(_))));

    let oversized = service
        .add_expense(group_id, input("Carne", 2_000_000.0, members[0].id, all.clone()))
        .await;
    assert!(matches!(oversized, Err(JuntappError::InvalidAmount(_))));

    let nobody = service
        .add_expense(group_id, input("Carne", 10.0, members[0].id, vec![]))
        .await;
    assert!(matches!(nobody, Err(JuntappError::EmptyParticipants)));

    let stranger = Uuid::new_v4();
    let bad_payer = service
        .add_expense(group_id, input("Carne", 10.0, stranger, all.clone()))
        .await;
    assert!(matches!(bad_payer, Err(JuntappError::PayerNotMember(_))));

    let bad_participant = service
        .add_expense(group_id, input("Carne", 10.0, members[0].id, vec![stranger]))
        .await;
    assert!(matches!(
        bad_participant,
        Err(JuntappError::ParticipantNotMember(_))
    ));
}

#[tokio::test]
async fn update_expense_recomputes_shares_and_keeps_receipt() {
    let (service, group_id, members) = seeded_group().await;
    let all: Vec<Uuid> = members.iter().map(|m| m.id).collect();

    let expense = service
        .add_expense(group_id, input("Carne", 30.0, members[0].id, all.clone()))
        .await
        .unwrap();
    service
        .attach_receipt(group_id, expense.id, "aGVsbG8=".to_string())
        .await
        .unwrap();

    let updated = service
        .update_expense(
            group_id,
            expense.id,
            input("Carne y carbón", 40.0, members[1].id, all[..2].to_vec()),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, expense.id);
    assert_eq!(updated.payer, Payer::Member(members[1].id));
    assert_eq!(updated.shares.len(), 2);
    for share in &updated.shares {
        assert!((share.share - 20.0).abs() < 1e-9);
    }
    assert_eq!(updated.receipt_image.as_deref(), Some("aGVsbG8="));
}

#[tokio::test]
async fn remove_expense_requires_existing_id() {
    let (service, group_id, members) = seeded_group().await;
    let all: Vec<Uuid> = members.iter().map(|m| m.id).collect();

    let expense = service
        .add_expense(group_id, input("Carne", 30.0, members[0].id, all))
        .await
        .unwrap();
    service.remove_expense(group_id, expense.id).await.unwrap();

    let stored = service.get_group(group_id).await.unwrap().unwrap();
    assert!(stored.expenses.is_empty());

    let missing = service.remove_expense(group_id, expense.id).await;
    assert!(matches!(missing, Err(JuntappError::ExpenseNotFound(_))));
}

#[tokio::test]
async fn expense_flow_ends_settled() {
    let (service, group_id, members) = seeded_group().await;
    let all: Vec<Uuid> = members.iter().map(|m| m.id).collect();

    service
        .add_expense(group_id, input("Carne", 60.0, members[0].id, all.clone()))
        .await
        .unwrap();
    service
        .add_expense(group_id, input("Bebidas", 30.0, members[1].id, all.clone()))
        .await
        .unwrap();

    let totals = service.summary(group_id).await.unwrap();
    assert!((totals.total_spent - 90.0).abs() < 1e-9);
    assert!((totals.each_should_pay - 30.0).abs() < 1e-9);

    let plan = service.settlement_plan(group_id).await.unwrap();
    let mut adjusted = totals.balances.clone();
    for transfer in &plan {
        *adjusted.get_mut(&transfer.from.id).unwrap() += transfer.amount;
        *adjusted.get_mut(&transfer.to.id).unwrap() -= transfer.amount;
    }
    for balance in adjusted.values() {
        assert!(balance.abs() <= 0.01);
    }
}

#[tokio::test]
async fn mouse_consequence_targets_worst_debtor() {
    let (service, group_id, members) = seeded_group().await;
    let all: Vec<Uuid> = members.iter().map(|m| m.id).collect();

    // Ana fronts everything, Carla also owes for a round she sat out of.
    service
        .add_expense(group_id, input("Carne", 30.0, members[0].id, all.clone()))
        .await
        .unwrap();
    service
        .add_expense(
            group_id,
            input("Bebidas", 20.0, members[0].id, vec![members[2].id]),
        )
        .await
        .unwrap();

    let mouse = service
        .consequence_for_mouse(group_id)
        .await
        .unwrap()
        .expect("there should be a mouse");
    assert_eq!(mouse.member.id, members[2].id);
    assert!(crate::constants::CONSEQUENCES
        .iter()
        .any(|c| *c == mouse.consequence));

    // Marking the debtors as settled leaves no mouse.
    service.toggle_member_paid(group_id, members[1].id).await.unwrap();
    service.toggle_member_paid(group_id, members[2].id).await.unwrap();
    assert!(service
        .consequence_for_mouse(group_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn random_payer_comes_from_the_group() {
    let (service, group_id, members) = seeded_group().await;
    let ids: Vec<Uuid> = members.iter().map(|m| m.id).collect();

    for _ in 0..20 {
        let picked = service.pick_random_payer(group_id).await.unwrap().unwrap();
        assert!(ids.contains(&picked.id));
    }

    let empty = service.create_group("Vacío", None, None).await.unwrap();
    assert!(service.pick_random_payer(empty.id).await.unwrap().is_none());
}
