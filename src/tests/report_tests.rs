use crate::models::{Category, Payer};
use crate::report::{
    distribution_by_category, distribution_by_description, export_csv, member_spending,
};
use crate::tests::{expense, group_with_members};
use crate::visualization::Visualization;
use crate::JuntappError;

#[test]
fn category_distribution_accumulates_in_first_seen_order() {
    let (mut group, ids) = group_with_members(&["Ana", "Bruno"]);
    let mut bebida = expense("Cerveza", 20.0, Payer::Member(ids[0]), &ids);
    bebida.category = Category::Bebida;
    let mut mas_bebida = expense("Fernet", 15.0, Payer::Member(ids[1]), &ids);
    mas_bebida.category = Category::Bebida;
    group.expenses.push(bebida);
    group
        .expenses
        .push(expense("Carne", 50.0, Payer::Member(ids[0]), &ids));
    group.expenses.push(mas_bebida);

    let distribution = distribution_by_category(&group);
    assert_eq!(
        distribution,
        vec![(Category::Bebida, 35.0), (Category::Comida, 50.0)]
    );
}

#[test]
fn description_distribution_merges_repeated_descriptions() {
    let (mut group, ids) = group_with_members(&["Ana", "Bruno"]);
    group
        .expenses
        .push(expense("Carne", 30.0, Payer::Member(ids[0]), &ids));
    group
        .expenses
        .push(expense("Hielo", 5.0, Payer::Member(ids[1]), &ids));
    group
        .expenses
        .push(expense("Carne", 12.0, Payer::Member(ids[1]), &ids));

    let distribution = distribution_by_description(&group);
    assert_eq!(
        distribution,
        vec![("Carne".to_string(), 42.0), ("Hielo".to_string(), 5.0)]
    );
}

#[test]
fn member_spending_counts_only_known_payers() {
    let (mut group, ids) = group_with_members(&["Ana", "Bruno"]);
    group
        .expenses
        .push(expense("Carne", 30.0, Payer::Member(ids[0]), &ids));
    group
        .expenses
        .push(expense("Bebidas", 20.0, Payer::Member(ids[0]), &ids));
    group
        .expenses
        .push(expense("Hielo", 5.0, Payer::Unknown, &ids));

    let spending = member_spending(&group);
    assert_eq!(spending.len(), 2);
    assert_eq!(spending[0].member.name, "Ana");
    assert!((spending[0].paid - 50.0).abs() < 1e-9);
    assert!((spending[1].paid - 0.0).abs() < 1e-9);
}

#[test]
fn csv_export_emits_one_row_per_expense() {
    let (mut group, ids) = group_with_members(&["Ana", "Bruno"]);
    group
        .expenses
        .push(expense("Carne", 30.0, Payer::Member(ids[0]), &ids));
    let (mut empty_group, _) = group_with_members(&["Carla"]);
    empty_group.name = "Cumple".to_string();

    let csv = export_csv(&[group, empty_group]).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Grupo,Miembro,Gasto,Monto,Pagador"));
    assert!(lines[1].contains("Carne"));
    assert!(lines[1].contains("30.00"));
    assert!(lines[1].contains("Ana;Bruno"));
    assert!(lines[2].starts_with("Cumple,N/A,N/A,0.00"));
}

#[test]
fn csv_export_renders_deleted_participants_as_unknown() {
    let (mut group, ids) = group_with_members(&["Ana", "Bruno"]);
    group
        .expenses
        .push(expense("Carne", 30.0, Payer::Member(ids[0]), &ids));
    // Bruno leaves but the stored expense still references him.
    group.members.retain(|m| m.id != ids[1]);

    let csv = export_csv(std::slice::from_ref(&group)).unwrap();
    let row = csv.lines().nth(1).unwrap();
    assert!(row.contains("Ana;Desconocido"));
}

#[test]
fn balance_chart_requires_members() {
    let (group, _) = group_with_members(&[]);
    assert!(matches!(
        Visualization::balance_chart(&group),
        Err(JuntappError::NoBalancesAvailable(_))
    ));

    let (mut group, ids) = group_with_members(&["Ana", "Bruno"]);
    group
        .expenses
        .push(expense("Carne", 30.0, Payer::Member(ids[0]), &ids));

    let chart = Visualization::balance_chart(&group).unwrap();
    assert_eq!(chart["type"], "bar");
    assert_eq!(chart["data"]["labels"][0], "Ana");
    assert_eq!(chart["data"]["datasets"][0]["data"][0], 15.0);
    assert_eq!(chart["data"]["datasets"][0]["data"][1], -15.0);
}

#[test]
fn category_chart_follows_distribution() {
    let (mut group, ids) = group_with_members(&["Ana", "Bruno"]);
    group
        .expenses
        .push(expense("Carne", 50.0, Payer::Member(ids[0]), &ids));
    let mut bebida = expense("Cerveza", 20.0, Payer::Member(ids[1]), &ids);
    bebida.category = Category::Bebida;
    group.expenses.push(bebida);

    let chart = Visualization::category_chart(&group);
    assert_eq!(chart["type"], "pie");
    assert_eq!(chart["data"]["labels"][0], "Comida");
    assert_eq!(chart["data"]["labels"][1], "Bebida");
    assert_eq!(chart["data"]["datasets"][0]["data"][0], 50.0);
    assert_eq!(chart["data"]["datasets"][0]["data"][1], 20.0);
}
