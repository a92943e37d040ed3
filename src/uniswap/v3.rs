use anyhow::{Result, bail};

use alloy::primitives::aliases::U160;
use alloy::primitives::{Address, B256, b256, keccak256};
use alloy::providers::Provider;

use crate::config::NetworkConfig;
use crate::trade::Token;
use crate::uniswap::v2::sort_tokens;

/// keccak256 of the UniswapV3Pool creation bytecode.
pub const V3_POOL_INIT_CODE_HASH: B256 =
    b256!("0xe34f199b19b2b4f47f68442619d555527d244f78a3297ea89325f843f87b8b54");

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = 887272;

/// Fee tiers deployed on mainnet, in probing order.
pub const FEE_TIERS: [u32; 4] = [100, 500, 3000, 10000];

alloy::sol! {
    #[sol(rpc)]
    interface IUniswapV3Pool {
        function liquidity() external view returns (uint128);
        function slot0() external view returns (
            uint160 sqrtPriceX96,
            int24 tick,
            uint16 observationIndex,
            uint16 observationCardinality,
            uint16 observationCardinalityNext,
            uint8 feeProtocol,
            bool unlocked
        );
    }

    #[sol(rpc)]
    interface IUniswapV3Factory {
        function getPool(address tokenA, address tokenB, uint24 fee) external view returns (address pool);
    }
}

pub fn tick_spacing(fee: u32) -> Result<i32> {
    Ok(match fee {
        100 => 1,
        500 => 10,
        3000 => 60,
        10000 => 200,
        other => bail!("unknown v3 fee tier: {other}"),
    })
}

/// Round to the closest tick the pool can actually initialize, staying
/// inside the usable range.
pub fn nearest_usable_tick(tick: i32, spacing: i32) -> i32 {
    assert!(spacing > 0, "tick spacing must be positive");
    let rem = tick.rem_euclid(spacing);
    let mut rounded = if 2 * rem >= spacing {
        tick - rem + spacing
    } else {
        tick - rem
    };
    if rounded < MIN_TICK {
        rounded += spacing;
    } else if rounded > MAX_TICK {
        rounded -= spacing;
    }
    rounded
}

/// One initialized tick as downstream pool models expect it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickBound {
    pub index: i32,
    pub liquidity_net: i128,
    pub liquidity_gross: u128,
}

/// Two synthetic bounds spanning the whole usable range, with all current
/// liquidity entering at the bottom and leaving at the top. Enough for
/// single-pool pricing against the fetched state; not a real tick table.
pub fn full_range_bounds(liquidity: u128, spacing: i32) -> Result<[TickBound; 2]> {
    let net = i128::try_from(liquidity)?;
    Ok([
        TickBound {
            index: nearest_usable_tick(MIN_TICK, spacing),
            liquidity_net: net,
            liquidity_gross: liquidity,
        },
        TickBound {
            index: nearest_usable_tick(MAX_TICK, spacing),
            liquidity_net: -net,
            liquidity_gross: liquidity,
        },
    ])
}

/// Snapshot of one concentrated-liquidity pool.
#[derive(Clone, Debug)]
pub struct PoolState {
    pub address: Address,
    pub token0: Token,
    pub token1: Token,
    pub fee: u32,
    pub sqrt_price_x96: U160,
    pub tick: i32,
    pub liquidity: u128,
    pub ticks: [TickBound; 2],
}

/// CREATE2 derivation of the pool address, order-insensitive in its
/// token arguments. Salt is abi.encode(token0, token1, fee).
pub fn compute_pool_address(
    factory: Address,
    token_a: Address,
    token_b: Address,
    fee: u32,
) -> Address {
    let (t0, t1) = if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };
    let mut enc = [0u8; 96];
    enc[12..32].copy_from_slice(t0.as_slice());
    enc[44..64].copy_from_slice(t1.as_slice());
    enc[93..96].copy_from_slice(&fee.to_be_bytes()[1..]);
    factory.create2(keccak256(enc), V3_POOL_INIT_CODE_HASH)
}

/// Read liquidity and slot0 for the pool at the given fee tier. Two
/// round-trips; node failures surface to the caller as-is.
pub async fn get_pool<P: Provider + Clone>(
    provider: P,
    cfg: &NetworkConfig,
    token_a: &Token,
    token_b: &Token,
    fee: u32,
) -> Result<PoolState> {
    let spacing = tick_spacing(fee)?;
    let address = compute_pool_address(cfg.v3_factory, token_a.address, token_b.address, fee);
    let pool = IUniswapV3Pool::new(address, provider);

    let liquidity = pool.liquidity().call().await?;
    let slot0 = pool.slot0().call().await?;
    let tick: i32 = slot0.tick.try_into()?;

    let (token0, token1) = sort_tokens(token_a, token_b);
    Ok(PoolState {
        address,
        token0: token0.clone(),
        token1: token1.clone(),
        fee,
        sqrt_price_x96: slot0.sqrtPriceX96,
        tick,
        liquidity,
        ticks: full_range_bounds(liquidity, spacing)?,
    })
}

/// Probe the factory across fee tiers and return the first deployed pool
/// with its fee.
pub async fn first_live_pool<P: Provider + Clone>(
    provider: P,
    cfg: &NetworkConfig,
    token_a: Address,
    token_b: Address,
) -> Result<(u32, Address)> {
    let factory = IUniswapV3Factory::new(cfg.v3_factory, provider);
    for fee in FEE_TIERS {
        let pool = factory.getPool(token_a, token_b, fee.try_into()?).call().await?;
        if pool != Address::ZERO {
            return Ok((fee, pool));
        }
    }
    bail!("no pool found for token pair");
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const WETH: Address = address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
    const USDC: Address = address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

    #[test]
    fn derives_mainnet_usdc_weth_pools() {
        let cfg = NetworkConfig::mainnet();
        assert_eq!(
            compute_pool_address(cfg.v3_factory, USDC, WETH, 500),
            address!("0x88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640"),
        );
        assert_eq!(
            compute_pool_address(cfg.v3_factory, WETH, USDC, 3000),
            address!("0x8ad599c3A0ff1De082011EFDDc58f1908eb6e6D8"),
        );
    }

    #[test]
    fn spacing_per_fee_tier() {
        assert_eq!(tick_spacing(100).unwrap(), 1);
        assert_eq!(tick_spacing(500).unwrap(), 10);
        assert_eq!(tick_spacing(3000).unwrap(), 60);
        assert_eq!(tick_spacing(10000).unwrap(), 200);
        assert!(tick_spacing(2500).is_err());
    }

    #[test]
    fn usable_tick_rounding() {
        assert_eq!(nearest_usable_tick(85, 60), 60);
        assert_eq!(nearest_usable_tick(95, 60), 120);
        assert_eq!(nearest_usable_tick(-30, 60), 0);
        assert_eq!(nearest_usable_tick(0, 1), 0);
    }

    #[test]
    fn usable_tick_clamps_to_range() {
        assert_eq!(nearest_usable_tick(MIN_TICK, 60), -887220);
        assert_eq!(nearest_usable_tick(MAX_TICK, 60), 887220);
        assert_eq!(nearest_usable_tick(MIN_TICK, 1), MIN_TICK);
        assert_eq!(nearest_usable_tick(MAX_TICK, 1), MAX_TICK);
    }

    #[test]
    fn bounds_cancel_out() {
        let bounds = full_range_bounds(1_000_000, 10).unwrap();
        assert_eq!(bounds[0].index, -887270);
        assert_eq!(bounds[1].index, 887270);
        assert_eq!(bounds[0].liquidity_net + bounds[1].liquidity_net, 0);
        assert_eq!(bounds[0].liquidity_gross, bounds[1].liquidity_gross);
    }
}
