#[cfg(test)]
mod memory;
mod schema;
mod sqlite;

use anyhow::{Context, Result};

use crate::models::Transaction;

#[cfg(test)]
pub(crate) use memory::MemoryBlobStore;
pub(crate) use sqlite::SqliteBlobStore;

/// Slot holding the serialized transaction list.
pub(crate) const TRANSACTIONS_KEY: &str = "transactions";
/// Slot receiving an unreadable transaction blob before it is replaced.
pub(crate) const CORRUPT_BACKUP_KEY: &str = "transactions.corrupt";
/// Slot holding the highest id ever issued. Never lowered by removals.
pub(crate) const LAST_ID_KEY: &str = "transactions.last_id";

/// An opaque key-value medium where every value is overwritten wholesale.
pub(crate) trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Result of reading the transaction slot.
#[derive(Debug, Default)]
pub(crate) struct Loaded {
    pub(crate) transactions: Vec<Transaction>,
    /// The stored blob could not be parsed and was set aside.
    pub(crate) recovered_from_corruption: bool,
    /// Highest id issued so far, including ids of removed transactions.
    pub(crate) last_id: i64,
}

/// Reads and writes the whole transaction collection as one JSON blob.
pub(crate) struct TransactionStore {
    blobs: Box<dyn BlobStore>,
}

impl TransactionStore {
    pub(crate) fn new(blobs: impl BlobStore + 'static) -> Self {
        Self {
            blobs: Box::new(blobs),
        }
    }

    /// Absent slot loads as empty. A malformed slot also loads as empty: the
    /// raw blob is copied to [`CORRUPT_BACKUP_KEY`] and the caller is told.
    pub(crate) fn load(&mut self) -> Result<Loaded> {
        let last_id = self.load_last_id()?;
        let Some(raw) = self.blobs.get(TRANSACTIONS_KEY)? else {
            tracing::debug!("no stored transactions, starting empty");
            return Ok(Loaded {
                last_id,
                ..Loaded::default()
            });
        };

        match serde_json::from_str::<Vec<Transaction>>(&raw) {
            Ok(transactions) => {
                tracing::debug!(count = transactions.len(), "loaded transactions");
                Ok(Loaded {
                    transactions,
                    recovered_from_corruption: false,
                    last_id,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored transactions are unreadable, starting empty");
                self.blobs
                    .put(CORRUPT_BACKUP_KEY, &raw)
                    .context("Failed to back up unreadable transactions")?;
                Ok(Loaded {
                    transactions: Vec::new(),
                    recovered_from_corruption: true,
                    last_id,
                })
            }
        }
    }

    pub(crate) fn save(&mut self, transactions: &[Transaction]) -> Result<()> {
        let raw =
            serde_json::to_string(transactions).context("Failed to serialize transactions")?;
        self.blobs.put(TRANSACTIONS_KEY, &raw)?;
        tracing::debug!(count = transactions.len(), "saved transactions");
        Ok(())
    }

    /// Record `id` as issued. Written before the transaction itself so a
    /// crash in between can only skip an id, never hand it out twice.
    pub(crate) fn save_last_id(&mut self, id: i64) -> Result<()> {
        self.blobs.put(LAST_ID_KEY, &id.to_string())
    }

    /// An unreadable mark counts as zero; the ledger still never goes below
    /// the largest id it loaded.
    fn load_last_id(&self) -> Result<i64> {
        let Some(raw) = self.blobs.get(LAST_ID_KEY)? else {
            return Ok(0);
        };
        match raw.trim().parse() {
            Ok(id) => Ok(id),
            Err(e) => {
                tracing::warn!(error = %e, raw = %raw, "unreadable id mark, ignoring");
                Ok(0)
            }
        }
    }
}
