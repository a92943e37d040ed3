use alloy::primitives::{Address, U256};

pub const DEFAULT_SLIPPAGE_BPS: u32 = 500; // 5%
pub const DEFAULT_DEADLINE_SECS: u64 = 1800;

/// Fully resolved options handed to swap execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapOptions {
    pub slippage_bps: u32,
    pub recipient: Address,
    pub deadline_secs: u64,
}

/// Caller-supplied partial configuration. Anything left `None` takes the
/// documented default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwapOverrides {
    pub slippage_bps: Option<u32>,
    pub recipient: Option<Address>,
    pub deadline_secs: Option<u64>,
}

/// Merge overrides onto the defaults. Pure; later-specified keys win.
pub fn swap_options(overrides: SwapOverrides, recipient: Address) -> SwapOptions {
    SwapOptions {
        slippage_bps: overrides.slippage_bps.unwrap_or(DEFAULT_SLIPPAGE_BPS),
        recipient: overrides.recipient.unwrap_or(recipient),
        deadline_secs: overrides.deadline_secs.unwrap_or(DEFAULT_DEADLINE_SECS),
    }
}

/// Haircut a quote by slippage. Anything past 10000 bps is a full haircut.
pub fn apply_slippage_bps(quoted: U256, slippage_bps: u32) -> U256 {
    let bps = U256::from(10_000u64.saturating_sub(slippage_bps as u64));
    quoted * bps / U256::from(10_000u64)
}
