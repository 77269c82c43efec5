//! Common types used across the application

use serde::{Serialize, Serializer};
use solana_sdk::pubkey::Pubkey;
use std::fmt;

/// Raw program account as returned by the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolAccount {
    pub address: Pubkey,
    pub data: Vec<u8>,
}

impl PoolAccount {
    pub fn new(address: Pubkey, data: Vec<u8>) -> Self {
        Self { address, data }
    }
}

/// Token amount in the smallest unit of the mint
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenBalance(pub u64);

impl TokenBalance {
    pub fn new(amount: u64) -> Self {
        Self(amount)
    }
}

impl fmt::Display for TokenBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product of both reserve balances.
///
/// Not normalised by mint decimals, so it is only meaningful when comparing
/// pools of the same token pair. Two `u64` amounts always multiply into a
/// `u128` without overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LiquidityScore(pub u128);

impl LiquidityScore {
    pub const ZERO: LiquidityScore = LiquidityScore(0);

    pub fn from_reserves(base: TokenBalance, quote: TokenBalance) -> Self {
        Self(u128::from(base.0) * u128::from(quote.0))
    }

    pub fn value(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for LiquidityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// JSON consumers often parse numbers as f64, so the score goes out as a string.
impl Serialize for LiquidityScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// A pool that survived ranking, with its score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedResult {
    pub pool: Pubkey,
    pub score: LiquidityScore,
}
