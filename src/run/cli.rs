use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::models::{NewTransaction, Transaction};
use crate::query::{self, TypeFilter, ViewConfig};
use crate::ui::util::{bar_width, format_amount, truncate};

const BAR_WIDTH: usize = 30;

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], ledger),
        "remove" | "rm" => cli_remove(&args[2..], ledger),
        "list" | "ls" => cli_list(&args[2..], ledger),
        "summary" | "s" => cli_summary(ledger),
        "export" => cli_export(&args[2..], ledger),
        "import" => cli_import(&args[2..], ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("tally {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Tally - personal income and expense ledger");
    println!();
    println!("Usage: tally [--store <path>] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  add <date> <description> <amount> <income|expense> <category>");
    println!("                                Record a transaction");
    println!("  remove <id> [--yes]           Delete a transaction (alias: rm)");
    println!("  list [--type <t>] [--search <text>]");
    println!("                                List transactions, newest first (alias: ls)");
    println!("  summary                       Print totals and expenses by category (alias: s)");
    println!("  export [path]                 Export all transactions to CSV");
    println!("  import <file.csv>             Add every valid row of a CSV file");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Environment:");
    println!("  TALLY_STORE                   Store path (overridden by --store)");
    println!("  TALLY_LOG                     Log filter, e.g. debug or tally=trace");
}

fn cli_add(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let [date, description, amount, kind, category] = args else {
        anyhow::bail!(
            "Usage: tally add <date> <description> <amount> <income|expense> <category>"
        );
    };

    let candidate = NewTransaction::new(
        description.as_str(),
        amount.as_str(),
        date.as_str(),
        category.as_str(),
        kind.as_str(),
    );
    let txn = ledger.add(&candidate)?;
    println!("Added #{}: {}", txn.id, format_row(&txn));
    Ok(())
}

fn cli_remove(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let yes = args.iter().any(|a| a == "--yes" || a == "-y");
    let Some(raw_id) = args.iter().find(|a| !a.starts_with('-')) else {
        anyhow::bail!("Usage: tally remove <id> [--yes]");
    };
    let id: i64 = raw_id
        .parse()
        .with_context(|| format!("Invalid id: {raw_id}"))?;

    let Some(txn) = ledger.get(id) else {
        println!("No transaction with id {id}");
        return Ok(());
    };

    if !yes {
        print!("Delete {}? [y/N] ", format_row(txn));
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !is_confirmation(&answer) {
            println!("Cancelled");
            return Ok(());
        }
    }

    if ledger.remove(id)? {
        println!("Removed #{id}");
    }
    Ok(())
}

fn cli_list(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let view = parse_view_args(args)?;
    let rows = query::filter_and_sort(ledger.list(), &view);

    if rows.is_empty() {
        println!("No matching transactions");
        return Ok(());
    }

    println!(
        "{:<15} {:<10} {:<8} {:<16} {:<32} {:>12}",
        "ID", "Date", "Type", "Category", "Description", "Amount"
    );
    println!("{}", "─".repeat(98));
    for txn in &rows {
        println!(
            "{:<15} {:<10} {:<8} {:<16} {:<32} {:>12}",
            txn.id,
            txn.date.format("%Y-%m-%d"),
            txn.kind.as_str(),
            truncate(&txn.category, 16),
            truncate(&txn.description, 32),
            format_amount(txn.signed_amount()),
        );
    }
    println!();
    println!("{} of {} transactions", rows.len(), ledger.list().len());
    Ok(())
}

fn cli_summary(ledger: &mut Ledger) -> Result<()> {
    let all = ledger.list();
    let summary = query::summarize(all);

    println!("Tally");
    println!("{}", "─".repeat(40));
    println!("  Income:     {}", format_amount(summary.income));
    println!("  Expenses:   {}", format_amount(summary.expenses));
    println!("  Balance:    {}", format_amount(summary.balance));
    println!("  Total Txns: {}", all.len());

    println!();
    println!("Expenses by Category:");
    let breakdown = query::category_breakdown(all);
    if breakdown.categories().is_empty() {
        println!("  No expenses recorded yet");
    }
    for cat in breakdown.categories() {
        println!(
            "  {:<18} {:<width$} {:>12}",
            truncate(&cat.category, 18),
            "█".repeat(bar_width(cat.percent, BAR_WIDTH)),
            format_amount(cat.amount),
            width = BAR_WIDTH,
        );
    }

    Ok(())
}

fn cli_export(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| super::shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/tally-export.csv")
        });

    let rows = query::filter_and_sort(ledger.list(), &ViewConfig::default());
    let count = crate::exchange::export_csv(Path::new(&output_path), &rows)?;
    if count == 0 {
        println!("No transactions to export");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

fn cli_import(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let Some(file_path) = args.first() else {
        anyhow::bail!("Usage: tally import <file.csv>");
    };
    let file_path = super::shellexpand(file_path);
    let path = Path::new(&file_path);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let rows = crate::exchange::read_csv(path)?;
    println!("Parsed {} rows", rows.len());

    let mut added = 0;
    let mut skipped = 0;
    for row in &rows {
        match ledger.add(&row.candidate) {
            Ok(_) => added += 1,
            Err(LedgerError::Invalid(e)) => {
                eprintln!("  line {}: {e}", row.line);
                skipped += 1;
            }
            Err(LedgerError::Storage(e)) => return Err(e),
        }
    }

    tracing::info!(added, skipped, file = %file_path, "csv import finished");
    println!("Imported {added} transactions ({skipped} invalid rows skipped)");
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────

/// Build a view from `--type <filter>` and `--search <text>` flags.
fn parse_view_args(args: &[String]) -> Result<ViewConfig> {
    let flag = |name: &str| {
        args.windows(2)
            .find(|w| w[0] == name)
            .map(|w| w[1].as_str())
    };

    let type_filter = match flag("--type") {
        Some(raw) => TypeFilter::parse(raw).ok_or_else(|| {
            anyhow::anyhow!("Unknown type filter '{raw}'. Use all, income or expense")
        })?,
        None => TypeFilter::All,
    };
    let search = flag("--search").unwrap_or_default().to_string();

    Ok(ViewConfig::new(type_filter, search))
}

fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn format_row(txn: &Transaction) -> String {
    format!(
        "{} {} '{}' [{}] {}",
        txn.date.format("%Y-%m-%d"),
        txn.kind,
        txn.description,
        txn.category,
        format_amount(txn.amount)
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_view_args() {
        let view = parse_view_args(&args(&["--type", "income", "--search", "rent"])).unwrap();
        assert_eq!(view.type_filter, TypeFilter::Income);
        assert_eq!(view.search, "rent");

        let view = parse_view_args(&[]).unwrap();
        assert_eq!(view.type_filter, TypeFilter::All);
        assert!(view.search.is_empty());

        assert!(parse_view_args(&args(&["--type", "transfers"])).is_err());
    }

    #[test]
    fn test_is_confirmation() {
        assert!(is_confirmation("y\n"));
        assert!(is_confirmation("  YES "));
        assert!(!is_confirmation("\n"));
        assert!(!is_confirmation("no"));
    }

    #[test]
    fn test_format_row() {
        let txn = Transaction {
            id: 7,
            description: "Coffee".into(),
            amount: dec!(4.50),
            date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            category: "Food".into(),
            kind: TransactionKind::Expense,
        };
        assert_eq!(format_row(&txn), "2024-03-02 expense 'Coffee' [Food] $4.50");
    }

    #[test]
    fn test_shellexpand() {
        assert_eq!(super::super::shellexpand("/tmp/a.csv"), "/tmp/a.csv");
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        assert_eq!(
            super::super::shellexpand("~/a.csv"),
            format!("{home}/a.csv")
        );
    }
}
