use anyhow::Result;

use alloy::primitives::{Address, U256};
use alloy::providers::Provider;

use crate::config::NetworkConfig;
use crate::log;
use crate::writing::cc;

alloy::sol! {
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address owner) view returns (uint256);
    }
}

pub fn format_token(amount: U256, decimals: u32) -> String {
    let base = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / base;
    let frac = amount % base;
    if frac.is_zero() {
        return format!("{whole}");
    }
    let mut frac_str = format!("{:0width$}", frac, width = decimals as usize);
    while frac_str.ends_with('0') {
        frac_str.pop();
    }
    format!("{whole}.{frac_str}")
}

async fn token_balance_of<P: Provider + Clone>(
    provider: P,
    token: Address,
    owner: Address,
) -> Result<U256> {
    let erc20 = IERC20::new(token, provider);
    Ok(erc20.balanceOf(owner).call().await?)
}

/// Dump native + WETH/USDC/UNI balances for an address to the crate log.
/// Diagnostic only; reads run sequentially and the first failure aborts.
pub async fn log_balances<P: Provider + Clone>(
    provider: P,
    cfg: &NetworkConfig,
    recipient: Address,
) -> Result<()> {
    let eth = provider.get_balance(recipient).await?;
    let weth = token_balance_of(provider.clone(), cfg.weth, recipient).await?;
    let usdc = token_balance_of(provider.clone(), cfg.usdc, recipient).await?;
    let uni = token_balance_of(provider.clone(), cfg.uni, recipient).await?;

    log!(cc::CYAN, "Balances for {}", recipient);
    log!(cc::CYAN, "  ETH  {}", format_token(eth, 18));
    log!(cc::CYAN, "  WETH {}", format_token(weth, 18));
    log!(cc::CYAN, "  USDC {}", format_token(usdc, 6));
    log!(cc::CYAN, "  UNI  {}", format_token(uni, 18));
    Ok(())
}
