//! Fixed-offset view over a PumpSwap pool account

use solana_sdk::pubkey::Pubkey;
use crate::shared::errors::PoolError;
use crate::shared::types::PoolAccount;

const ADDRESS_LEN: usize = 32;

/// Address fields read from the pool account.
///
/// Offsets mirror the on-chain `Pool` struct: 8-byte discriminator, bump (u8),
/// index (u16) and creator precede the mints; the LP mint sits between the
/// quote mint and the reserve accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolField {
    BaseMint,
    QuoteMint,
    BaseReserve,
    QuoteReserve,
}

impl PoolField {
    pub const ALL: [PoolField; 4] = [
        PoolField::BaseMint,
        PoolField::QuoteMint,
        PoolField::BaseReserve,
        PoolField::QuoteReserve,
    ];

    pub const fn offset(self) -> usize {
        match self {
            PoolField::BaseMint => 43,
            PoolField::QuoteMint => 75,
            PoolField::BaseReserve => 139,
            PoolField::QuoteReserve => 171,
        }
    }

    pub const fn end(self) -> usize {
        self.offset() + ADDRESS_LEN
    }

    pub const fn name(self) -> &'static str {
        match self {
            PoolField::BaseMint => "base_mint",
            PoolField::QuoteMint => "quote_mint",
            PoolField::BaseReserve => "pool_base_token_account",
            PoolField::QuoteReserve => "pool_quote_token_account",
        }
    }
}

/// Smallest buffer that holds every field we read
pub const MIN_POOL_ACCOUNT_LEN: usize = PoolField::QuoteReserve.end();

/// Decoded addresses of one pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolLayout {
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub base_reserve: Pubkey,
    pub quote_reserve: Pubkey,
}

pub struct PoolLayoutDecoder;

impl PoolLayoutDecoder {
    pub fn decode(account: &PoolAccount) -> Result<PoolLayout, PoolError> {
        let data = account.data.as_slice();
        if data.len() < MIN_POOL_ACCOUNT_LEN {
            return Err(PoolError::MalformedAccount {
                address: account.address,
                reason: format!(
                    "data is {} bytes, need at least {}",
                    data.len(),
                    MIN_POOL_ACCOUNT_LEN
                ),
            });
        }

        let read = |field: PoolField| -> Result<Pubkey, PoolError> {
            Pubkey::try_from(&data[field.offset()..field.end()]).map_err(|_| {
                PoolError::MalformedAccount {
                    address: account.address,
                    reason: format!("{} is not a 32-byte address", field.name()),
                }
            })
        };

        Ok(PoolLayout {
            base_mint: read(PoolField::BaseMint)?,
            quote_mint: read(PoolField::QuoteMint)?,
            base_reserve: read(PoolField::BaseReserve)?,
            quote_reserve: read(PoolField::QuoteReserve)?,
        })
    }
}

/// Builds raw pool data with the given addresses at their offsets
#[cfg(test)]
pub(crate) fn encode_pool_data(layout: &PoolLayout, len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    for field in PoolField::ALL {
        let key = match field {
            PoolField::BaseMint => layout.base_mint,
            PoolField::QuoteMint => layout.quote_mint,
            PoolField::BaseReserve => layout.base_reserve,
            PoolField::QuoteReserve => layout.quote_reserve,
        };
        if field.end() <= len {
            data[field.offset()..field.end()].copy_from_slice(&key.to_bytes());
        }
    }
    data
}
