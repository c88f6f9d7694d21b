use anyhow::{Context, Result};
use std::path::PathBuf;

const STORE_ENV: &str = "TALLY_STORE";
const LOG_ENV: &str = "TALLY_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) store_path: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) log_filter: String,
}

impl Config {
    /// Resolve the configuration, consuming a `--store <path>` flag from
    /// `args` if present so command dispatch never sees it.
    pub(crate) fn resolve(args: &mut Vec<String>) -> Result<Self> {
        let flag = take_flag_value(args, "--store")?;
        let store_path = match flag.or_else(|| std::env::var(STORE_ENV).ok()) {
            Some(p) => PathBuf::from(crate::run::shellexpand(&p)),
            None => default_store_path()?,
        };

        if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let log_path = store_path.with_file_name("tally.log");
        let log_filter =
            std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            store_path,
            log_path,
            log_filter,
        })
    }
}

/// Remove `name <value>` from `args`, returning the value.
pub(crate) fn take_flag_value(args: &mut Vec<String>, name: &str) -> Result<Option<String>> {
    let Some(pos) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        anyhow::bail!("{name} requires a value");
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(value))
}

fn default_store_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "tally", "Tally")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().join("tally.db"))
}
