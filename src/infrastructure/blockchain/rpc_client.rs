//! Solana RPC client for direct blockchain reading

use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_client::rpc_request::RpcError;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::time::Duration;
use tracing::debug;

use crate::domain::ledger::{LedgerQueryService, MemcmpFilter};
use crate::shared::errors::LedgerError;
use crate::shared::types::{PoolAccount, TokenBalance};

/// JSON-RPC "invalid params". Nodes answer `getTokenAccountBalance` with it
/// when the account is missing or is not a token account.
const JSON_RPC_INVALID_PARAMS: i64 = -32602;

/// Solana RPC client wrapper
pub struct SolanaRpcClient {
    client: RpcClient,
}

impl SolanaRpcClient {
    /// Create new RPC client
    pub fn new(rpc_url: String, commitment: CommitmentConfig, timeout: Duration) -> Self {
        Self {
            client: RpcClient::new_with_timeout_and_commitment(rpc_url, timeout, commitment),
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

fn to_rpc_filter(filter: &MemcmpFilter) -> RpcFilterType {
    RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
        filter.offset,
        filter.bytes.to_bytes().to_vec(),
    ))
}

/// Whether the node reported the account as missing or not a token account
fn is_missing_token_account(error: &ClientError) -> bool {
    matches!(
        &error.kind,
        ClientErrorKind::RpcError(RpcError::RpcResponseError { code, .. })
            if *code == JSON_RPC_INVALID_PARAMS
    )
}

fn parse_amount(account: &Pubkey, amount: &str) -> Option<TokenBalance> {
    match amount.parse::<u64>() {
        Ok(value) => Some(TokenBalance::new(value)),
        Err(e) => {
            debug!("Unparseable balance {:?} for {}: {}", amount, account, e);
            None
        }
    }
}

#[async_trait]
impl LedgerQueryService for SolanaRpcClient {
    async fn list_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: &[MemcmpFilter],
    ) -> Result<Vec<PoolAccount>, LedgerError> {
        let config = RpcProgramAccountsConfig {
            filters: Some(filters.iter().map(to_rpc_filter).collect()),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.client.commitment()),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };

        let accounts = self
            .client
            .get_program_accounts_with_config(program_id, config)
            .await
            .map_err(|e| LedgerError::Transport(format!("Failed to get program accounts: {}", e)))?;

        Ok(accounts
            .into_iter()
            .map(|(address, account)| PoolAccount::new(address, account.data))
            .collect())
    }

    async fn get_token_account_balance(
        &self,
        account: &Pubkey,
    ) -> Result<Option<TokenBalance>, LedgerError> {
        match self.client.get_token_account_balance(account).await {
            Ok(ui_amount) => Ok(parse_amount(account, &ui_amount.amount)),
            Err(e) if is_missing_token_account(&e) => {
                debug!("No token account at {}: {}", account, e);
                Ok(None)
            }
            Err(e) => Err(LedgerError::Transport(format!(
                "Failed to get token account balance for {}: {}",
                account, e
            ))),
        }
    }
}
