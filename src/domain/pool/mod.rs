//! Pool domain - locating and ranking liquidity pools

mod filters;
mod finder;
mod layout;
mod ranker;

pub use filters::{AccountFilterBuilder, PairFilters};
pub use finder::{PoolFinder, PUMPSWAP_PROGRAM_ID};
pub use layout::{PoolField, PoolLayout, PoolLayoutDecoder, MIN_POOL_ACCOUNT_LEN};
pub use ranker::{select_max, LiquidityRanker, DEFAULT_MAX_CONCURRENT_POOLS};
