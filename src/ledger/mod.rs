use anyhow::Result;

use crate::error::LedgerError;
use crate::models::{NewTransaction, Transaction};
use crate::store::TransactionStore;

/// The authoritative in-memory transaction collection. Every mutation is
/// written through to the store before it returns.
pub(crate) struct Ledger {
    transactions: Vec<Transaction>,
    store: TransactionStore,
    recovered_from_corruption: bool,
    /// Highest id ever issued, persisted so removals never free an id.
    last_id: i64,
}

impl Ledger {
    /// Load the stored collection once. It stays authoritative for the life
    /// of the ledger.
    pub(crate) fn initialize(mut store: TransactionStore) -> Result<Self> {
        let loaded = store.load()?;
        let max_loaded = loaded.transactions.iter().map(|t| t.id).max().unwrap_or(0);
        let last_id = loaded.last_id.max(max_loaded);
        tracing::info!(count = loaded.transactions.len(), last_id, "ledger initialized");
        Ok(Self {
            transactions: loaded.transactions,
            store,
            recovered_from_corruption: loaded.recovered_from_corruption,
            last_id,
        })
    }

    /// True when the stored collection was unreadable and the ledger started
    /// empty instead.
    pub(crate) fn recovered_from_corruption(&self) -> bool {
        self.recovered_from_corruption
    }

    pub(crate) fn add(&mut self, candidate: &NewTransaction) -> Result<Transaction, LedgerError> {
        let txn = candidate.validate(self.next_id())?;
        self.store.save_last_id(txn.id)?;
        self.last_id = txn.id;

        self.transactions.push(txn.clone());
        if let Err(e) = self.store.save(&self.transactions) {
            self.transactions.pop();
            return Err(e.into());
        }

        tracing::info!(
            id = txn.id,
            kind = %txn.kind,
            amount = %txn.amount,
            category = %txn.category,
            "added transaction"
        );
        Ok(txn)
    }

    /// Remove by id. Unknown ids are a no-op and report `false`.
    pub(crate) fn remove(&mut self, id: i64) -> Result<bool, LedgerError> {
        let Some(pos) = self.transactions.iter().position(|t| t.id == id) else {
            tracing::debug!(id, "remove: no such transaction");
            return Ok(false);
        };

        let removed = self.transactions.remove(pos);
        if let Err(e) = self.store.save(&self.transactions) {
            self.transactions.insert(pos, removed);
            return Err(e.into());
        }

        tracing::info!(id, "removed transaction");
        Ok(true)
    }

    /// All transactions in insertion order.
    pub(crate) fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Creation-time ids, bumped past every id issued so far so that two
    /// adds in the same millisecond, or an add after removing the newest
    /// transaction, still get a fresh id.
    fn next_id(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        now.max(self.last_id.saturating_add(1))
    }
}

#[cfg(test)]
mod tests;
