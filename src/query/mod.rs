//! Derived views over a ledger snapshot: totals, the filtered transaction
//! list, and the expense breakdown by category. Nothing here holds state.

use rust_decimal::Decimal;
use std::ops::Add;

use crate::models::{Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) balance: Decimal,
}

impl Add for Summary {
    type Output = Summary;

    fn add(self, rhs: Summary) -> Summary {
        let income = self.income.saturating_add(rhs.income);
        let expenses = self.expenses.saturating_add(rhs.expenses);
        Summary {
            income,
            expenses,
            balance: income - expenses,
        }
    }
}

/// Totals saturate at `Decimal::MAX` rather than overflow, so a stored
/// collection with out-of-range amounts still renders.
pub(crate) fn summarize(transactions: &[Transaction]) -> Summary {
    let (income, expenses) =
        transactions
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| match t.kind {
                TransactionKind::Income => (inc.saturating_add(t.amount), exp),
                TransactionKind::Expense => (inc, exp.saturating_add(t.amount)),
            });
    Summary {
        income,
        expenses,
        balance: income - expenses,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Some(Self::All),
            "income" => Some(Self::Income),
            "expense" | "expenses" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Cycle all -> income -> expense -> all.
    pub(crate) fn next(self) -> Self {
        match self {
            Self::All => Self::Income,
            Self::Income => Self::Expense,
            Self::Expense => Self::All,
        }
    }

    fn matches(&self, kind: TransactionKind) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == TransactionKind::Income,
            Self::Expense => kind == TransactionKind::Expense,
        }
    }
}

impl std::fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ViewConfig {
    pub(crate) type_filter: TypeFilter,
    pub(crate) search: String,
}

impl ViewConfig {
    pub(crate) fn new(type_filter: TypeFilter, search: impl Into<String>) -> Self {
        Self {
            type_filter,
            search: search.into(),
        }
    }
}

/// Filter by type and search term, then order by date, newest first.
/// Transactions sharing a date keep their ledger (insertion) order.
pub(crate) fn filter_and_sort(transactions: &[Transaction], config: &ViewConfig) -> Vec<Transaction> {
    let term = config.search.trim().to_lowercase();

    let mut view: Vec<Transaction> = transactions
        .iter()
        .filter(|t| config.type_filter.matches(t.kind))
        .filter(|t| {
            term.is_empty()
                || t.description.to_lowercase().contains(&term)
                || t.category.to_lowercase().contains(&term)
        })
        .cloned()
        .collect();

    // sort_by is stable
    view.sort_by(|a, b| b.date.cmp(&a.date));
    view
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    /// Share of the largest category, 0-100, for relative bar sizing.
    pub(crate) percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CategoryBreakdown {
    /// No expenses at all: nothing to chart.
    NoData,
    Categories(Vec<CategoryTotal>),
}

impl CategoryBreakdown {
    pub(crate) fn categories(&self) -> &[CategoryTotal] {
        match self {
            Self::NoData => &[],
            Self::Categories(c) => c,
        }
    }
}

/// Expense totals per category, largest first. Categories with equal totals
/// keep the order in which they first appear.
pub(crate) fn category_breakdown(transactions: &[Transaction]) -> CategoryBreakdown {
    let mut groups: Vec<(String, Decimal)> = Vec::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        match groups.iter_mut().find(|(name, _)| *name == txn.category) {
            Some((_, total)) => *total = total.saturating_add(txn.amount),
            None => groups.push((txn.category.clone(), txn.amount)),
        }
    }

    if groups.is_empty() {
        return CategoryBreakdown::NoData;
    }

    groups.sort_by(|a, b| b.1.cmp(&a.1));
    let max = groups[0].1;
    let hundred = Decimal::ONE_HUNDRED;

    let totals = groups
        .into_iter()
        .map(|(category, amount)| {
            let percent = if max.is_zero() {
                Decimal::ZERO
            } else {
                (amount / max * hundred).round_dp(2)
            };
            CategoryTotal {
                category,
                amount,
                percent,
            }
        })
        .collect();

    CategoryBreakdown::Categories(totals)
}
