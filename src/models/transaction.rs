use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn all() -> &'static [TransactionKind] {
        &[Self::Income, Self::Expense]
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense. `amount` is always a positive magnitude,
/// the direction is carried by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    pub(crate) id: i64,
    pub(crate) description: String,
    pub(crate) amount: Decimal,
    pub(crate) date: NaiveDate,
    pub(crate) category: String,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionKind,
}

impl Transaction {
    pub(crate) fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the sign implied by `kind` (expenses negative).
    pub(crate) fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Raw, unvalidated field input for a new transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NewTransaction {
    pub(crate) description: String,
    pub(crate) amount: String,
    pub(crate) date: String,
    pub(crate) category: String,
    pub(crate) kind: String,
}

impl NewTransaction {
    pub(crate) fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
        category: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            date: date.into(),
            category: category.into(),
            kind: kind.into(),
        }
    }

    /// Validate the raw fields and build a transaction carrying `id`.
    /// Description and category are kept exactly as submitted; blank ones
    /// are rejected.
    pub(crate) fn validate(&self, id: i64) -> Result<Transaction, ValidationError> {
        required("description", &self.description)?;
        let amount_str = required("amount", &self.amount)?;
        let date_str = required("date", &self.date)?;
        required("category", &self.category)?;
        let kind_str = required("type", &self.kind)?;

        let amount = parse_amount(amount_str)?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(date_str.to_string()))?;
        let kind = TransactionKind::parse(kind_str)
            .ok_or_else(|| ValidationError::InvalidKind(kind_str.to_string()))?;

        Ok(Transaction {
            id,
            description: self.description.clone(),
            amount,
            date,
            category: self.category.clone(),
            kind,
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

/// Largest accepted amount, 10^12. Keeps every sum over a realistic ledger far
/// inside `Decimal`'s range.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Parse a user-typed amount. A leading `$` and correctly grouped thousands
/// separators are accepted; the result must be in `(0, MAX_AMOUNT]`.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    let invalid = || ValidationError::InvalidAmount(trimmed.to_string());

    let cleaned = strip_thousands(&trimmed.replace('$', "")).ok_or_else(invalid)?;
    let amount = Decimal::from_str(cleaned.trim()).map_err(|_| invalid())?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(amount)
}

/// Drop `,` separators, but only when they split the integer part into
/// groups of three.
fn strip_thousands(s: &str) -> Option<String> {
    if !s.contains(',') {
        return Some(s.to_string());
    }
    let (int_part, frac) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    if frac.contains(',') {
        return None;
    }

    let mut groups = int_part.trim().trim_start_matches(['-', '+']).split(',');
    let lead = groups.next()?;
    if lead.is_empty() || lead.len() > 3 || groups.any(|g| g.len() != 3) {
        return None;
    }
    Some(s.replace(',', ""))
}
