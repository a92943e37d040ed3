use {
    anyhow::{Context, Result},
    dotenv::dotenv,
    serde::{Deserialize, Serialize},
    url::Url,
};

use alloy::primitives::{Address, address};
use alloy::providers::{Provider, ProviderBuilder};

use crate::trade::Token;

pub fn load_env() {
    dotenv().ok();
}

/// Everything venue-specific lives here instead of module-level constants,
/// so the same helpers work against forks of other networks and tests can
/// build states without touching a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub v2_factory: Address,
    pub v3_factory: Address,
    pub weth: Address,
    pub usdc: Address,
    pub uni: Address,
}

impl NetworkConfig {
    /// Ethereum mainnet deployments (the network the harness forks).
    pub fn mainnet() -> Self {
        Self {
            chain_id: 1,
            v2_factory: address!("0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"),
            v3_factory: address!("0x1F98431c8aD98523631AE4a59f267346ea31F984"),
            weth: address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            usdc: address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            uni: address!("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
        }
    }

    pub fn weth_token(&self) -> Token {
        Token::new(self.weth, 18, "WETH")
    }

    pub fn usdc_token(&self) -> Token {
        Token::new(self.usdc, 6, "USDC")
    }

    pub fn uni_token(&self) -> Token {
        Token::new(self.uni, 18, "UNI")
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub rpc_url: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            rpc_url: std::env::var("RPC_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8545".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain HTTP provider for the harness node.
pub fn connect_http(cfg: &Config) -> Result<impl Provider + Clone> {
    let url = Url::parse(&cfg.rpc_url)
        .with_context(|| format!("Failed to parse RPC_URL: {}", cfg.rpc_url))?;
    Ok(ProviderBuilder::new().connect_http(url))
}
