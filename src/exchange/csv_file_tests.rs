#![allow(clippy::unwrap_used)]

use std::io::Write;

use rust_decimal_macros::dec;

use super::csv_file::*;
use crate::models::{NewTransaction, TransactionKind};

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_export_writes_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let txns = vec![
        NewTransaction::new("Salary", "1000", "2024-01-05", "Work", "income")
            .validate(10)
            .unwrap(),
        NewTransaction::new("Rent, January", "400.50", "2024-01-01", "Housing", "expense")
            .validate(11)
            .unwrap(),
    ];

    let count = export_csv(&path, &txns).unwrap();
    assert_eq!(count, 2);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "id,date,type,category,description,amount");
    assert_eq!(lines[1], "10,2024-01-05,income,Work,Salary,1000");
    // Embedded comma is quoted
    assert_eq!(lines[2], "11,2024-01-01,expense,Housing,\"Rent, January\",400.50");
}

#[test]
fn test_export_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    assert_eq!(export_csv(&path, &[]).unwrap(), 0);
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.trim(), "id,date,type,category,description,amount");
}

#[test]
fn test_read_exported_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let original = NewTransaction::new("Coffee", "4.50", "2024-03-02", "Food", "expense");
    export_csv(&path, &[original.validate(1).unwrap()]).unwrap();

    let rows = read_csv(&path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].line, 2);

    let txn = rows[0].candidate.validate(99).unwrap();
    assert_eq!(txn.description, "Coffee");
    assert_eq!(txn.amount, dec!(4.50));
    assert_eq!(txn.kind, TransactionKind::Expense);
}

#[test]
fn test_read_columns_by_name_without_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "in.csv",
        "Amount,Description,Type,Date,Category\n\
         12.00, Lunch ,expense,2024-04-01,Food\n\
         ,Broken,expense,2024-04-02,Food\n",
    );

    let rows = read_csv(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].candidate.description, "Lunch");
    assert_eq!(rows[0].candidate.amount, "12.00");
    assert_eq!(rows[1].line, 3);
    assert!(rows[1].candidate.validate(1).is_err());
}

#[test]
fn test_read_missing_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.csv", "date,description,amount\n2024-01-01,x,1\n");
    let err = read_csv(&path).unwrap_err();
    assert!(err.to_string().contains("'type'"));
}

#[test]
fn test_read_line_numbers_follow_multiline_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "multi.csv",
        "date,type,category,description,amount\n\
         2024-04-01,expense,Food,\"Lunch\nwith the team\",30\n\
         2024-04-02,expense,Food,Dinner,\n",
    );

    let rows = read_csv(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].line, 2);
    assert_eq!(rows[0].candidate.description, "Lunch\nwith the team");
    assert_eq!(rows[1].line, 4);
    assert!(rows[1].candidate.validate(1).is_err());
}
