//! Liquidity ranking of candidate pools

use futures::stream::{self, StreamExt, TryStreamExt};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::ledger::LedgerQueryService;
use crate::shared::errors::{LedgerError, PoolError};
use crate::shared::types::{LiquidityScore, PoolAccount, RankedResult, TokenBalance};
use super::layout::PoolLayoutDecoder;

pub const DEFAULT_MAX_CONCURRENT_POOLS: usize = 8;

/// Scores candidate pools by reserve product and picks the deepest one
pub struct LiquidityRanker {
    ledger: Arc<dyn LedgerQueryService>,
    max_concurrent_pools: usize,
}

impl LiquidityRanker {
    pub fn new(ledger: Arc<dyn LedgerQueryService>, max_concurrent_pools: usize) -> Self {
        Self {
            ledger,
            max_concurrent_pools: max_concurrent_pools.max(1),
        }
    }

    /// Every qualifying candidate with its score, in candidate order.
    ///
    /// Pools are scored concurrently, but `buffered` hands results back in
    /// input order, so ranking never depends on response timing. The first
    /// transport failure ends the ranking and drops the lookups still in
    /// flight.
    pub async fn rank(&self, candidates: &[PoolAccount]) -> Result<Vec<RankedResult>, LedgerError> {
        stream::iter(candidates)
            .map(|pool| self.score_pool(pool))
            .buffered(self.max_concurrent_pools)
            .try_filter_map(|scored| async move {
                Ok(match scored {
                    Ok(result) => Some(result),
                    Err(e) => {
                        warn!("Skipping candidate: {}", e);
                        None
                    }
                })
            })
            .try_collect()
            .await
    }

    /// Deepest candidate. Ties go to the earliest candidate.
    pub async fn select_best(&self, candidates: &[PoolAccount]) -> Result<Option<RankedResult>, LedgerError> {
        Ok(select_max(self.rank(candidates).await?))
    }

    /// Outer error ends the query, inner error only disqualifies this pool
    async fn score_pool(&self, pool: &PoolAccount) -> Result<Result<RankedResult, PoolError>, LedgerError> {
        let layout = match PoolLayoutDecoder::decode(pool) {
            Ok(layout) => layout,
            Err(e) => return Ok(Err(e)),
        };

        let (base, quote) = tokio::try_join!(
            self.fetch_balance(&layout.base_reserve),
            self.fetch_balance(&layout.quote_reserve),
        )?;
        let (base, quote) = match (base, quote) {
            (Ok(base), Ok(quote)) => (base, quote),
            (Err(e), _) | (_, Err(e)) => return Ok(Err(e)),
        };
        let score = LiquidityScore::from_reserves(base, quote);

        debug!(
            "Pool {} reserves {} / {} score {}",
            pool.address, layout.base_reserve, layout.quote_reserve, score
        );

        Ok(Ok(RankedResult { pool: pool.address, score }))
    }

    async fn fetch_balance(&self, account: &Pubkey) -> Result<Result<TokenBalance, PoolError>, LedgerError> {
        Ok(self
            .ledger
            .get_token_account_balance(account)
            .await?
            .ok_or(PoolError::BalanceUnavailable(*account)))
    }
}

/// Running maximum starting from zero; only a strictly greater score replaces
/// the current best.
pub fn select_max<I>(ranked: I) -> Option<RankedResult>
where
    I: IntoIterator<Item = RankedResult>,
{
    let mut best: Option<RankedResult> = None;
    let mut max = LiquidityScore::ZERO;

    for candidate in ranked {
        if candidate.score > max {
            max = candidate.score;
            best = Some(candidate);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::fake::FakeLedger;
    use crate::domain::pool::layout::{encode_pool_data, PoolLayout};
    use std::time::Duration;

    struct TestPool {
        account: PoolAccount,
        layout: PoolLayout,
    }

    fn test_pool() -> TestPool {
        let layout = PoolLayout {
            base_mint: Pubkey::new_unique(),
            quote_mint: Pubkey::new_unique(),
            base_reserve: Pubkey::new_unique(),
            quote_reserve: Pubkey::new_unique(),
        };
        TestPool {
            account: PoolAccount::new(Pubkey::new_unique(), encode_pool_data(&layout, 211)),
            layout,
        }
    }

    fn funded(ledger: FakeLedger, pool: &TestPool, base: u64, quote: u64) -> FakeLedger {
        ledger
            .with_balance(pool.layout.base_reserve, base)
            .with_balance(pool.layout.quote_reserve, quote)
    }

    fn ranked(pool: &TestPool, score: u128) -> RankedResult {
        RankedResult { pool: pool.account.address, score: LiquidityScore(score) }
    }

    #[test]
    fn test_select_max_prefers_higher_score() {
        let a = test_pool();
        let b = test_pool();

        let forward = select_max(vec![ranked(&a, 100), ranked(&b, 250)]);
        let reverse = select_max(vec![ranked(&b, 250), ranked(&a, 100)]);

        assert_eq!(forward.unwrap().pool, b.account.address);
        assert_eq!(reverse.unwrap().pool, b.account.address);
    }

    #[test]
    fn test_select_max_keeps_first_on_tie() {
        let a = test_pool();
        let b = test_pool();

        let best = select_max(vec![ranked(&a, 500), ranked(&b, 500)]).unwrap();
        assert_eq!(best.pool, a.account.address);
    }

    #[test]
    fn test_select_max_ignores_zero_scores() {
        let a = test_pool();
        assert_eq!(select_max(vec![ranked(&a, 0)]), None);
        assert_eq!(select_max(Vec::new()), None);
    }

    #[tokio::test]
    async fn test_rank_scores_each_pool() {
        let a = test_pool();
        let b = test_pool();
        let ledger = funded(funded(FakeLedger::new(), &a, 10, 10), &b, 5, 50);

        let ranker = LiquidityRanker::new(Arc::new(ledger), 4);
        let results = ranker.rank(&[a.account.clone(), b.account.clone()]).await.unwrap();

        assert_eq!(results, vec![ranked(&a, 100), ranked(&b, 250)]);
    }

    #[tokio::test]
    async fn test_best_pool_is_highest_score() {
        let a = test_pool();
        let b = test_pool();
        let ledger = funded(funded(FakeLedger::new(), &a, 10, 10), &b, 5, 50);

        let ranker = LiquidityRanker::new(Arc::new(ledger), 4);
        let best = ranker.select_best(&[a.account.clone(), b.account.clone()]).await.unwrap().unwrap();

        assert_eq!(best, ranked(&b, 250));
    }

    #[tokio::test]
    async fn test_tie_break_ignores_response_timing() {
        let a = test_pool();
        let b = test_pool();
        // The earlier candidate answers last
        let ledger = funded(funded(FakeLedger::new(), &a, 20, 30), &b, 30, 20)
            .with_balance_delay(a.layout.base_reserve, Duration::from_millis(50))
            .with_balance_delay(a.layout.quote_reserve, Duration::from_millis(50));

        let ranker = LiquidityRanker::new(Arc::new(ledger), 4);
        let best = ranker.select_best(&[a.account.clone(), b.account.clone()]).await.unwrap().unwrap();

        assert_eq!(best.pool, a.account.address);
    }

    #[tokio::test]
    async fn test_short_account_is_skipped() {
        let short = PoolAccount::new(Pubkey::new_unique(), vec![1u8; 50]);
        let good = test_pool();
        let ledger = Arc::new(funded(FakeLedger::new(), &good, 3, 4));

        let ranker = LiquidityRanker::new(ledger.clone(), 4);
        let best = ranker.select_best(&[short, good.account.clone()]).await.unwrap().unwrap();

        assert_eq!(best, ranked(&good, 12));
        // Undecodable pools never hit the ledger
        assert_eq!(ledger.balance_calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_balance_disqualifies_only_candidate() {
        let pool = test_pool();
        let ledger = FakeLedger::new().with_balance(pool.layout.base_reserve, 1_000);

        let ranker = LiquidityRanker::new(Arc::new(ledger), 4);
        assert_eq!(ranker.select_best(&[pool.account.clone()]).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_balance_transport_error_ends_ranking() {
        let flaky = test_pool();
        let healthy = test_pool();
        let ledger = funded(funded(FakeLedger::new(), &flaky, 1_000, 1_000), &healthy, 2, 2)
            .with_failing_balance(flaky.layout.quote_reserve);

        let ranker = LiquidityRanker::new(Arc::new(ledger), 4);
        let err = ranker
            .rank(&[flaky.account.clone(), healthy.account.clone()])
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::Transport(_)));
    }

    #[tokio::test]
    async fn test_balance_transport_error_is_not_reported_as_no_pool() {
        let pool = test_pool();
        let ledger = funded(FakeLedger::new(), &pool, 10, 10)
            .with_failing_balance(pool.layout.quote_reserve);

        let ranker = LiquidityRanker::new(Arc::new(ledger), 4);
        assert_eq!(
            ranker.select_best(&[pool.account.clone()]).await,
            Err(LedgerError::Transport("timeout".to_string()))
        );
    }

    #[tokio::test]
    async fn test_large_reserves_rank_without_overflow() {
        let whale = test_pool();
        let minnow = test_pool();
        let ledger = funded(
            funded(FakeLedger::new(), &minnow, u64::MAX, 1),
            &whale,
            5_000_000_000_000,
            6_000_000_000_000,
        );

        let ranker = LiquidityRanker::new(Arc::new(ledger), 1);
        let best = ranker
            .select_best(&[minnow.account.clone(), whale.account.clone()])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(best.pool, whale.account.address);
        assert_eq!(best.score.value(), 30_000_000_000_000_000_000_000_000);
    }

    #[tokio::test]
    async fn test_duplicate_candidates_are_tolerated() {
        let pool = test_pool();
        let ledger = funded(FakeLedger::new(), &pool, 7, 8);

        let ranker = LiquidityRanker::new(Arc::new(ledger), 0);
        let results = ranker.rank(&[pool.account.clone(), pool.account.clone()]).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(select_max(results).unwrap(), ranked(&pool, 56));
    }
}
