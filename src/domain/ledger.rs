//! Ledger query capability consumed by pool discovery

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use crate::shared::errors::LedgerError;
use crate::shared::types::{PoolAccount, TokenBalance};

/// Byte-exact match of an address at a fixed offset in account data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemcmpFilter {
    pub offset: usize,
    pub bytes: Pubkey,
}

impl MemcmpFilter {
    pub fn new(offset: usize, bytes: Pubkey) -> Self {
        Self { offset, bytes }
    }

    /// Whether `data` carries `bytes` at `offset`
    #[cfg(test)]
    pub(crate) fn matches(&self, data: &[u8]) -> bool {
        let end = self.offset + 32;
        data.len() >= end && data[self.offset..end] == self.bytes.to_bytes()
    }
}

/// Read-only view of the ledger's account index.
///
/// Implementations own transport concerns. Callers treat every
/// `LedgerError` as fatal for the call that produced it.
#[async_trait]
pub trait LedgerQueryService: Send + Sync {
    /// All accounts owned by `program_id` that match every filter.
    /// An empty result is not an error.
    async fn list_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: &[MemcmpFilter],
    ) -> Result<Vec<PoolAccount>, LedgerError>;

    /// Balance of a token account, or `None` if the account does not exist
    /// or is not a token account.
    async fn get_token_account_balance(
        &self,
        account: &Pubkey,
    ) -> Result<Option<TokenBalance>, LedgerError>;
}
