use anyhow::{Context, Result};
use std::path::Path;

use crate::models::{NewTransaction, Transaction};

const HEADER: [&str; 6] = ["id", "date", "type", "category", "description", "amount"];

/// Write transactions to a CSV file in the given order. Returns the row count.
pub(crate) fn export_csv(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    wtr.write_record(HEADER)?;

    for txn in transactions {
        wtr.write_record([
            txn.id.to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.kind.as_str().to_string(),
            txn.category.clone(),
            txn.description.clone(),
            txn.amount.to_string(),
        ])?;
    }

    wtr.flush().context("Failed to write CSV file")?;
    Ok(transactions.len())
}

/// One parsed CSV data row: the 1-based line it starts on and the raw fields.
#[derive(Debug, Clone)]
pub(crate) struct CsvRow {
    pub(crate) line: u64,
    pub(crate) candidate: NewTransaction,
}

/// Read rows written by [`export_csv`] (or any CSV with the same named
/// columns, in any order). The `id` column is optional and ignored: imported
/// rows get fresh ids from the ledger.
pub(crate) fn read_csv(path: &Path) -> Result<Vec<CsvRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers = rdr.headers().context("Failed to read CSV header")?.clone();
    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV is missing a '{name}' column"))
    };
    let date_col = column("date")?;
    let type_col = column("type")?;
    let category_col = column("category")?;
    let description_col = column("description")?;
    let amount_col = column("amount")?;

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.context("Failed to read CSV record")?;
        let field = |idx: usize| record.get(idx).unwrap_or("").to_string();
        rows.push(CsvRow {
            // where the record starts; quoted fields may span lines
            line: record.position().map_or(i as u64 + 2, |p| p.line()),
            candidate: NewTransaction {
                description: field(description_col),
                amount: field(amount_col),
                date: field(date_col),
                category: field(category_col),
                kind: field(type_col),
            },
        });
    }

    Ok(rows)
}
