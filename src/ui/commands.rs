use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::models::NewTransaction;
use crate::query::{self, TypeFilter, ViewConfig};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Tally", cmd_quit, r);
    register_command!("quit", "Quit Tally", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add transaction (e.g. :add 2024-01-15, Coffee, 4.50, expense, Food)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add transaction (e.g. :a 2024-01-15, Coffee, 4.50, expense, Food)",
        cmd_add,
        r
    );
    register_command!("delete", "Delete selected transaction", cmd_delete, r);
    register_command!("delete-txn", "Delete selected transaction", cmd_delete, r);
    register_command!(
        "filter",
        "Filter by type (e.g. :filter expense, :filter all)",
        cmd_filter,
        r
    );
    register_command!("f", "Filter by type (e.g. :f income)", cmd_filter, r);
    register_command!(
        "search",
        "Search description/category (e.g. :search coffee)",
        cmd_search,
        r
    );
    register_command!("s", "Search transactions (e.g. :s coffee)", cmd_search, r);
    register_command!("clear", "Clear type filter and search", cmd_clear, r);
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/tally.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Split `date, description, amount, type, category` into raw fields.
pub(crate) fn parse_add_args(args: &str) -> Option<NewTransaction> {
    let fields: Vec<&str> = args.split(',').map(str::trim).collect();
    match fields.as_slice() {
        [date, description, amount, kind, category] => Some(NewTransaction::new(
            *description,
            *amount,
            *date,
            *category,
            *kind,
        )),
        _ => None,
    }
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(ledger);
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh_transactions(ledger);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let Some(candidate) = parse_add_args(args) else {
        app.set_status(
            "Usage: :add <date>, <description>, <amount>, <income|expense>, <category>",
        );
        return Ok(());
    };

    match ledger.add(&candidate) {
        Ok(txn) => {
            app.refresh(ledger);
            app.set_status(format!(
                "Added {} '{}' {}",
                txn.kind,
                txn.description,
                super::util::format_amount(txn.amount)
            ));
        }
        Err(LedgerError::Invalid(e)) => {
            app.set_status(format!("Not added: {e}"));
        }
        Err(LedgerError::Storage(e)) => return Err(e),
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions || app.transactions.is_empty() {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }
    app.confirm_delete_selected();
    Ok(())
}

fn cmd_filter(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let Some(filter) = TypeFilter::parse(args) else {
        app.set_status(format!("Unknown filter '{args}'. Use all, income or expense"));
        return Ok(());
    };
    app.type_filter = filter;
    app.screen = Screen::Transactions;
    app.reset_cursor();
    app.refresh_transactions(ledger);
    app.set_status(format!("Showing {filter} transactions"));
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.screen = Screen::Transactions;
    app.reset_cursor();
    app.refresh_transactions(ledger);
    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("{} matches for '{args}'", app.transactions.len()));
    }
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.type_filter = TypeFilter::All;
    app.search_input.clear();
    app.reset_cursor();
    app.refresh_transactions(ledger);
    app.set_status("Filters cleared");
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/tally-export.csv")
    } else {
        crate::run::shellexpand(args)
    };

    let rows = query::filter_and_sort(ledger.list(), &ViewConfig::default());
    let count = crate::exchange::export_csv(std::path::Path::new(&path), &rows)?;
    if count == 0 {
        app.set_status("No transactions to export");
    } else {
        app.set_status(format!("Exported {count} transactions to {path}"));
    }
    Ok(())
}
