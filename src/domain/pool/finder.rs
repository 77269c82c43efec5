//! Best-pool lookup for a token pair

use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::ledger::LedgerQueryService;
use crate::shared::errors::LedgerError;
use crate::shared::types::{LiquidityScore, PoolAccount, RankedResult};
use super::filters::AccountFilterBuilder;
use super::ranker::LiquidityRanker;

/// PumpSwap AMM program
pub const PUMPSWAP_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("pAMMBay6oceH9fJKBRHGP5D4bD4sWpmSwMn52FMfXEA");

/// Finds the deepest pool of one AMM program for a token pair
pub struct PoolFinder {
    ledger: Arc<dyn LedgerQueryService>,
    program_id: Pubkey,
    ranker: LiquidityRanker,
}

impl PoolFinder {
    pub fn new(
        ledger: Arc<dyn LedgerQueryService>,
        program_id: Pubkey,
        max_concurrent_pools: usize,
    ) -> Self {
        Self {
            ranker: LiquidityRanker::new(Arc::clone(&ledger), max_concurrent_pools),
            ledger,
            program_id,
        }
    }

    /// Address of the deepest pool, or `None` when no pool qualifies.
    /// Transport failures from listing or balance lookups are returned as
    /// errors.
    pub async fn find_best_pool(
        &self,
        base_token: &Pubkey,
        quote_token: &Pubkey,
    ) -> Result<Option<Pubkey>, LedgerError> {
        Ok(self
            .find_best_ranked(base_token, quote_token)
            .await?
            .map(|best| best.pool))
    }

    /// Like `find_best_pool`, keeping the winning score
    pub async fn find_best_ranked(
        &self,
        base_token: &Pubkey,
        quote_token: &Pubkey,
    ) -> Result<Option<RankedResult>, LedgerError> {
        let candidates = self.collect_candidates(base_token, quote_token).await?;
        if candidates.is_empty() {
            info!("No pools found for pair {} / {}", base_token, quote_token);
            return Ok(None);
        }

        let best = self.ranker.select_best(&candidates).await?;
        match &best {
            Some(result) => info!(
                "Best pool for {} / {}: {} (score {})",
                base_token, quote_token, result.pool, result.score
            ),
            None => info!(
                "None of {} candidate pools for {} / {} qualified",
                candidates.len(), base_token, quote_token
            ),
        }
        Ok(best)
    }

    /// All pools with a non-zero score, deepest first. Equal scores keep
    /// candidate order.
    pub async fn rank_candidates(
        &self,
        base_token: &Pubkey,
        quote_token: &Pubkey,
    ) -> Result<Vec<RankedResult>, LedgerError> {
        let candidates = self.collect_candidates(base_token, quote_token).await?;
        let mut ranked: Vec<RankedResult> = self
            .ranker
            .rank(&candidates)
            .await?
            .into_iter()
            .filter(|result| result.score > LiquidityScore::ZERO)
            .collect();
        // Stable sort, so ties stay in candidate order
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(ranked)
    }

    /// Orientation A matches followed by orientation B matches
    async fn collect_candidates(
        &self,
        base_token: &Pubkey,
        quote_token: &Pubkey,
    ) -> Result<Vec<PoolAccount>, LedgerError> {
        let filters = AccountFilterBuilder::for_pair(base_token, quote_token);

        let (mut candidates, reversed) = tokio::try_join!(
            self.ledger.list_program_accounts(&self.program_id, &filters.orientation_a),
            self.ledger.list_program_accounts(&self.program_id, &filters.orientation_b),
        )?;

        debug!(
            "Found {} pools as {}/{} and {} as {}/{}",
            candidates.len(), base_token, quote_token,
            reversed.len(), quote_token, base_token
        );

        candidates.extend(reversed);
        Ok(candidates)
    }
}
