//! Direct blockchain reading for Solana pool data

pub mod rpc_client;

pub use rpc_client::SolanaRpcClient;
