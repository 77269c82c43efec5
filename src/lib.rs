//! Pool Finder - locates the deepest PumpSwap pool for a token pair
//! Built with Domain-Driven Design principles

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use domain::ledger::LedgerQueryService;
pub use domain::pool::{PoolFinder, PUMPSWAP_PROGRAM_ID};
pub use infrastructure::blockchain::SolanaRpcClient;
