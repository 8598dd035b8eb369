use clap::Parser;

/// Arguments for the ledger command
#[derive(Parser, Debug)]
pub struct LedgerArgs {
    /// Only print this key
    pub key: Option<String>,
}
