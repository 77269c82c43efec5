//! CLI commands and handlers
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::pool::PoolFinder;
use crate::infrastructure::blockchain::SolanaRpcClient;
use crate::shared::errors::AppError;
use crate::shared::types::LiquidityScore;
use crate::shared::utils::parse_address;

#[derive(Parser, Debug)]
#[command(name = "pool-finder")]
#[command(version, about = "Find the deepest PumpSwap pool for a token pair")]
pub struct Cli {
    /// Path to config file (optional)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// RPC endpoint URL (overrides config)
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// AMM program ID to scan (overrides config)
    #[arg(long, global = true)]
    pub program_id: Option<String>,

    /// Abort the whole query after this many seconds. Unlike
    /// `rpc.timeout_secs` in the config, which bounds each RPC request, this
    /// bounds every request of the query together.
    #[arg(long, global = true)]
    pub deadline_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the pool with the most liquidity for a pair
    Find {
        #[command(flatten)]
        pair: PairArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every funded pool for a pair, deepest first
    Rank {
        #[command(flatten)]
        pair: PairArgs,

        /// Limit number of pools to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}

#[derive(Args, Debug)]
pub struct PairArgs {
    /// Base token mint
    pub base_token: String,

    /// Quote token mint
    pub quote_token: String,
}

impl PairArgs {
    fn parse(&self) -> Result<(Pubkey, Pubkey), AppError> {
        Ok((parse_address(&self.base_token)?, parse_address(&self.quote_token)?))
    }
}

impl Cli {
    /// Apply CLI overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(rpc_url) = &self.rpc_url {
            config.rpc.url = rpc_url.clone();
        }
        if let Some(program_id) = &self.program_id {
            config.program.amm_program_id = program_id.clone();
        }
    }
}

#[derive(Debug, Serialize)]
struct FindReport {
    base_token: String,
    quote_token: String,
    pool: Option<String>,
    liquidity_score: Option<LiquidityScore>,
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute the selected command
    pub async fn execute(cli: Cli, config: Config) -> Result<(), AppError> {
        config.validate()?;
        let finder = Self::build_finder(&config)?;

        match cli.command {
            Commands::Find { pair, json } => {
                Self::with_deadline(cli.deadline_secs, Self::execute_find_command(&finder, pair, json)).await
            }
            Commands::Rank { pair, limit } => {
                Self::with_deadline(cli.deadline_secs, Self::execute_rank_command(&finder, pair, limit)).await
            }
        }
    }

    fn build_finder(config: &Config) -> Result<PoolFinder, AppError> {
        let client = SolanaRpcClient::new(config.rpc.url.clone(), config.commitment()?, config.timeout());
        info!("Using RPC {} for program {}", client.url(), config.program.amm_program_id);

        Ok(PoolFinder::new(
            Arc::new(client),
            config.program_id()?,
            config.discovery.max_concurrent_pools,
        ))
    }

    /// Run a query until it finishes, the deadline passes, or Ctrl-C arrives.
    /// Dropping the query future cancels every in-flight lookup.
    async fn with_deadline<F>(deadline_secs: Option<u64>, query: F) -> Result<(), AppError>
    where
        F: Future<Output = Result<(), AppError>>,
    {
        let deadline = async {
            match deadline_secs {
                Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            result = query => result,
            _ = deadline => Err(AppError::Timeout(deadline_secs.unwrap_or_default())),
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, discarding partial results");
                Err(AppError::Cancelled)
            }
        }
    }

    async fn execute_find_command(finder: &PoolFinder, pair: PairArgs, json: bool) -> Result<(), AppError> {
        let (base, quote) = pair.parse()?;
        let best = finder.find_best_ranked(&base, &quote).await?;

        if json {
            let report = FindReport {
                base_token: base.to_string(),
                quote_token: quote.to_string(),
                pool: best.map(|b| b.pool.to_string()),
                liquidity_score: best.map(|b| b.score),
            };
            let out = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::Output(format!("Failed to encode report: {}", e)))?;
            println!("{}", out);
            return Ok(());
        }

        match best {
            Some(result) => println!("Best pool for {} and {}: {}", base, quote, result.pool),
            None => println!("No pools found for pair {} and {}", base, quote),
        }
        Ok(())
    }

    async fn execute_rank_command(finder: &PoolFinder, pair: PairArgs, limit: usize) -> Result<(), AppError> {
        let (base, quote) = pair.parse()?;
        let ranked = finder.rank_candidates(&base, &quote).await?;

        if ranked.is_empty() {
            println!("No pools found for pair {} and {}", base, quote);
            return Ok(());
        }

        println!("Pools for {} and {} ({} funded):", base, quote, ranked.len());
        for (i, result) in ranked.iter().take(limit).enumerate() {
            println!("  {}. {} liquidity score {}", i + 1, result.pool, result.score);
        }
        Ok(())
    }
}
