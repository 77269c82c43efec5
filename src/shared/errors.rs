//! Error handling for the application

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Errors raised by the ledger query service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Per-candidate pool errors. These never leave the ranker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Malformed pool account {address}: {reason}")]
    MalformedAccount { address: Pubkey, reason: String },

    #[error("Balance unavailable for reserve account {0}")]
    BalanceUnavailable(Pubkey),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Query timed out after {0}s")]
    Timeout(u64),

    #[error("Output error: {0}")]
    Output(String),

    #[error("Query cancelled")]
    Cancelled,
}

