//! On-chain state readers for Uniswap v2 pairs and v3 pools.
//!
//! Pair/pool addresses are derived off-chain (CREATE2), so each fetch costs
//! only the state reads themselves. Factory lookups are kept around for
//! venues whose deployed bytecode differs from the canonical hashes.

pub mod v2;
pub mod v3;

pub use v2::*;
pub use v3::*;
