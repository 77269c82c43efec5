//! Memcmp filter sets for locating pools of a token pair

use solana_sdk::pubkey::Pubkey;
use crate::domain::ledger::MemcmpFilter;
use super::layout::PoolField;

/// Filters for both mint orderings of a pair.
///
/// The AMM does not canonicalise which mint is stored as base, so a pool for
/// the unordered pair may sit under either orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairFilters {
    /// base mint == base token, quote mint == quote token
    pub orientation_a: Vec<MemcmpFilter>,
    /// base mint == quote token, quote mint == base token
    pub orientation_b: Vec<MemcmpFilter>,
}

pub struct AccountFilterBuilder;

impl AccountFilterBuilder {
    pub fn for_pair(base_token: &Pubkey, quote_token: &Pubkey) -> PairFilters {
        PairFilters {
            orientation_a: Self::mint_filters(base_token, quote_token),
            orientation_b: Self::mint_filters(quote_token, base_token),
        }
    }

    fn mint_filters(base_mint: &Pubkey, quote_mint: &Pubkey) -> Vec<MemcmpFilter> {
        vec![
            MemcmpFilter::new(PoolField::BaseMint.offset(), *base_mint),
            MemcmpFilter::new(PoolField::QuoteMint.offset(), *quote_mint),
        ]
    }
}
