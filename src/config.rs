use anyhow::{Context, Result};
use serde::Deserialize;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::time::Duration;
use std::{fs, path::Path};

use crate::domain::pool::{DEFAULT_MAX_CONCURRENT_POOLS, PUMPSWAP_PROGRAM_ID};
use crate::shared::errors::AppError;
use crate::shared::utils::parse_address;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RpcCfg {
    pub url: String,
    pub commitment: String,
    pub timeout_secs: u64,
}

impl Default for RpcCfg {
    fn default() -> Self {
        Self {
            url: "https://api.mainnet-beta.solana.com".to_string(),
            commitment: "confirmed".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProgramCfg {
    pub amm_program_id: String,
}

impl Default for ProgramCfg {
    fn default() -> Self {
        Self { amm_program_id: PUMPSWAP_PROGRAM_ID.to_string() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoveryCfg {
    pub max_concurrent_pools: usize,
}

impl Default for DiscoveryCfg {
    fn default() -> Self {
        Self { max_concurrent_pools: DEFAULT_MAX_CONCURRENT_POOLS }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingCfg {
    pub level: String,
}

impl Default for LoggingCfg {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rpc: RpcCfg,
    pub program: ProgramCfg,
    pub discovery: DiscoveryCfg,
    pub logging: LoggingCfg,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read {}", path.as_ref().display()))?;
        Self::from_toml(&s)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parse Config.toml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the values that would otherwise fail deep inside a query
    pub fn validate(&self) -> Result<(), AppError> {
        self.program_id()?;
        self.commitment()?;
        if self.rpc.url.trim().is_empty() {
            return Err(AppError::ConfigError("rpc.url is empty".to_string()));
        }
        if self.discovery.max_concurrent_pools == 0 {
            return Err(AppError::ConfigError(
                "discovery.max_concurrent_pools must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn program_id(&self) -> Result<Pubkey, AppError> {
        parse_address(&self.program.amm_program_id)
            .map_err(|e| AppError::ConfigError(format!("program.amm_program_id: {}", e)))
    }

    pub fn commitment(&self) -> Result<CommitmentConfig, AppError> {
        CommitmentConfig::from_str(&self.rpc.commitment).map_err(|_| {
            AppError::ConfigError(format!("unknown rpc.commitment {:?}", self.rpc.commitment))
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.rpc.timeout_secs)
    }
}
