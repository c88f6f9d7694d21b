mod config;
mod error;
mod exchange;
mod ledger;
mod logging;
mod models;
mod query;
mod run;
mod store;
mod ui;

use anyhow::Result;

use config::Config;
use ledger::Ledger;
use store::{SqliteBlobStore, TransactionStore};

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().collect();
    let config = Config::resolve(&mut args)?;
    logging::init(&config);

    tracing::debug!(store = %config.store_path.display(), "opening store");
    let blobs = SqliteBlobStore::open(&config.store_path)?;
    let mut ledger = Ledger::initialize(TransactionStore::new(blobs))?;

    match args.len() {
        0 | 1 => run::as_tui(&mut ledger),
        _ => run::as_cli(&args, &mut ledger),
    }
}
