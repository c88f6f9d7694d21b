mod transaction;

#[cfg(test)]
pub(crate) use transaction::{parse_amount, MAX_AMOUNT};
pub(crate) use transaction::{NewTransaction, Transaction, TransactionKind};
