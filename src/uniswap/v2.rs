use anyhow::{Result, bail};

use alloy::primitives::{Address, B256, U256, b256, keccak256};
use alloy::providers::Provider;

use crate::config::NetworkConfig;
use crate::trade::Token;

/// keccak256 of the canonical UniswapV2Pair creation bytecode.
pub const V2_PAIR_INIT_CODE_HASH: B256 =
    b256!("0x96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f");

alloy::sol! {
    #[sol(rpc)]
    interface IUniswapV2Pair {
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
    }

    #[sol(rpc)]
    interface IUniswapV2Factory {
        function getPair(address tokenA, address tokenB) external view returns (address pair);
    }
}

/// Current reserves of one constant-product pair, tokens in pair order.
#[derive(Clone, Debug)]
pub struct PairState {
    pub address: Address,
    pub token0: Token,
    pub token1: Token,
    pub reserve0: U256,
    pub reserve1: U256,
}

/// Pair convention: token0 is the numerically lower address.
pub fn sort_tokens<'a>(a: &'a Token, b: &'a Token) -> (&'a Token, &'a Token) {
    if a.address < b.address { (a, b) } else { (b, a) }
}

/// CREATE2 derivation of the pair address, order-insensitive in its inputs.
pub fn compute_pair_address(factory: Address, token_a: Address, token_b: Address) -> Address {
    let (t0, t1) = if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };
    let mut packed = [0u8; 40];
    packed[..20].copy_from_slice(t0.as_slice());
    packed[20..].copy_from_slice(t1.as_slice());
    factory.create2(keccak256(packed), V2_PAIR_INIT_CODE_HASH)
}

/// Read the live reserves for a token pair. One `getReserves` round-trip;
/// any node failure surfaces to the caller as-is.
pub async fn get_pair<P: Provider + Clone>(
    provider: P,
    cfg: &NetworkConfig,
    token_a: &Token,
    token_b: &Token,
) -> Result<PairState> {
    let address = compute_pair_address(cfg.v2_factory, token_a.address, token_b.address);
    let pair = IUniswapV2Pair::new(address, provider);
    let reserves = pair.getReserves().call().await?;
    let (token0, token1) = sort_tokens(token_a, token_b);
    Ok(PairState {
        address,
        token0: token0.clone(),
        token1: token1.clone(),
        reserve0: reserves.reserve0.to::<U256>(),
        reserve1: reserves.reserve1.to::<U256>(),
    })
}

/// Factory lookup instead of CREATE2, for forks with a non-canonical pair
/// bytecode. Fails if the factory has no pair deployed.
pub async fn resolve_pair_via_factory<P: Provider + Clone>(
    provider: P,
    cfg: &NetworkConfig,
    token_a: Address,
    token_b: Address,
) -> Result<Address> {
    let factory = IUniswapV2Factory::new(cfg.v2_factory, provider);
    let pair = factory.getPair(token_a, token_b).call().await?;
    if pair == Address::ZERO {
        bail!("factory has no pair for token pair");
    }
    Ok(pair)
}
