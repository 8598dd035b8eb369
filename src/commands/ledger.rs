//! Ledger command

use std::path::PathBuf;

use serde_json::Value;

use crate::cli::LedgerArgs;
use crate::error::Result;

use super::helpers::Project;

/// Run ledger command
pub fn run(workspace: Option<PathBuf>, args: LedgerArgs) -> Result<i32> {
    let project = Project::open(workspace)?;
    let ledger = project.ledger()?;

    match args.key {
        Some(key) => {
            let value: Value = ledger.get(&key).map(Into::into).unwrap_or(Value::Null);
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        None => print!("{}", ledger.to_json()?),
    }

    Ok(0)
}
