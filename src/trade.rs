use alloy::primitives::{Address, U256};
use thiserror::Error;

/// Whether a trade fixes the amount going in or the amount coming out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

/// AMM design a leg is routed through. Set by whoever priced the leg,
/// never inferred from the leg's shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VenueKind {
    /// Constant-product pair (Uniswap v2).
    V2,
    /// Concentrated-liquidity pool (Uniswap v3).
    V3,
    /// Path crossing both pool designs.
    Mixed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub address: Address,
    pub decimals: u8,
    pub symbol: String,
}

impl Token {
    pub fn new(address: Address, decimals: u8, symbol: &str) -> Self {
        Self {
            address,
            decimals,
            symbol: symbol.to_string(),
        }
    }
}

/// Currency plus magnitude, raw base units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenAmount {
    pub token: Token,
    pub raw: U256,
}

impl TokenAmount {
    pub fn new(token: Token, raw: U256) -> Self {
        Self { token, raw }
    }
}

/// One priced segment of a trade: an ordered pair/pool path with the
/// amounts already computed by the producer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeLeg {
    pub route: Vec<Address>,
    pub input: TokenAmount,
    pub output: TokenAmount,
    pub venue: VenueKind,
    pub trade_type: TradeType,
}

/// A leg as stored inside the aggregate, with the venue tag carried by
/// the group it sits in instead of the record itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutedAmounts {
    pub route: Vec<Address>,
    pub input: TokenAmount,
    pub output: TokenAmount,
}

impl From<TradeLeg> for RoutedAmounts {
    fn from(leg: TradeLeg) -> Self {
        Self {
            route: leg.route,
            input: leg.input,
            output: leg.output,
        }
    }
}

/// The unified multi-venue trade handed to swap execution. Immutable once
/// composed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateTrade {
    pub v2_legs: Vec<RoutedAmounts>,
    pub v3_legs: Vec<RoutedAmounts>,
    pub mixed_legs: Vec<RoutedAmounts>,
    pub trade_type: TradeType,
}

impl AggregateTrade {
    pub fn len(&self) -> usize {
        self.v2_legs.len() + self.v3_legs.len() + self.mixed_legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("cannot compose a trade from zero legs")]
    EmptyLegs,
    #[error("legs disagree on trade type: first is {first:?}, found {other:?}")]
    MixedTradeTypes { first: TradeType, other: TradeType },
}

/// Partition legs by venue kind into one aggregate trade.
///
/// Relative order within each group matches the input; no leg is dropped
/// or duplicated. The aggregate's trade type is the first leg's — legs
/// with a different type are still grouped and keep their amounts, the
/// mismatch is NOT rejected here. Callers that want that check run
/// [`uniform_trade_type`] first.
pub fn compose(legs: Vec<TradeLeg>) -> Result<AggregateTrade, ComposeError> {
    let trade_type = legs.first().ok_or(ComposeError::EmptyLegs)?.trade_type;

    let mut v2_legs = Vec::new();
    let mut v3_legs = Vec::new();
    let mut mixed_legs = Vec::new();
    for leg in legs {
        match leg.venue {
            VenueKind::V2 => v2_legs.push(leg.into()),
            VenueKind::V3 => v3_legs.push(leg.into()),
            VenueKind::Mixed => mixed_legs.push(leg.into()),
        }
    }

    Ok(AggregateTrade {
        v2_legs,
        v3_legs,
        mixed_legs,
        trade_type,
    })
}

/// Check every leg agrees on the trade direction and return it.
pub fn uniform_trade_type(legs: &[TradeLeg]) -> Result<TradeType, ComposeError> {
    let first = legs.first().ok_or(ComposeError::EmptyLegs)?.trade_type;
    for leg in legs {
        if leg.trade_type != first {
            return Err(ComposeError::MixedTradeTypes {
                first,
                other: leg.trade_type,
            });
        }
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn tok(last_byte: u8) -> Token {
        let mut bytes = [0u8; 20];
        bytes[19] = last_byte;
        Token::new(Address::from(bytes), 18, "TST")
    }

    fn leg(tag: u8, venue: VenueKind, trade_type: TradeType) -> TradeLeg {
        let mut pool = [0u8; 20];
        pool[0] = 0xee;
        pool[19] = tag;
        TradeLeg {
            route: vec![Address::from(pool)],
            input: TokenAmount::new(tok(1), U256::from(1_000u64 + tag as u64)),
            output: TokenAmount::new(tok(2), U256::from(2_000u64 + tag as u64)),
            venue,
            trade_type,
        }
    }

    #[test]
    fn partitions_without_loss_or_duplication() {
        let legs = vec![
            leg(0, VenueKind::V3, TradeType::ExactInput),
            leg(1, VenueKind::V2, TradeType::ExactInput),
            leg(2, VenueKind::Mixed, TradeType::ExactInput),
            leg(3, VenueKind::V2, TradeType::ExactInput),
            leg(4, VenueKind::V3, TradeType::ExactInput),
        ];
        let expected: Vec<RoutedAmounts> = legs.iter().cloned().map(Into::into).collect();

        let agg = compose(legs).unwrap();
        assert_eq!(agg.len(), 5);
        assert_eq!(agg.v2_legs.len(), 2);
        assert_eq!(agg.v3_legs.len(), 2);
        assert_eq!(agg.mixed_legs.len(), 1);

        let mut seen: Vec<&RoutedAmounts> = agg
            .v2_legs
            .iter()
            .chain(agg.v3_legs.iter())
            .chain(agg.mixed_legs.iter())
            .collect();
        for want in &expected {
            let pos = seen.iter().position(|got| *got == want);
            assert!(pos.is_some(), "leg lost by compose: {:?}", want.route);
            seen.remove(pos.unwrap());
        }
        assert!(seen.is_empty(), "compose duplicated legs");
    }

    #[test]
    fn preserves_relative_order_within_groups() {
        let legs = vec![
            leg(0, VenueKind::V2, TradeType::ExactOutput),
            leg(1, VenueKind::V3, TradeType::ExactOutput),
            leg(2, VenueKind::V2, TradeType::ExactOutput),
            leg(3, VenueKind::V2, TradeType::ExactOutput),
            leg(4, VenueKind::V3, TradeType::ExactOutput),
        ];
        let agg = compose(legs.clone()).unwrap();
        let v2_expected: Vec<RoutedAmounts> = [0usize, 2, 3]
            .iter()
            .map(|&i| legs[i].clone().into())
            .collect();
        let v3_expected: Vec<RoutedAmounts> = [1usize, 4]
            .iter()
            .map(|&i| legs[i].clone().into())
            .collect();
        assert_eq!(agg.v2_legs, v2_expected);
        assert_eq!(agg.v3_legs, v3_expected);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(compose(vec![]).unwrap_err(), ComposeError::EmptyLegs);
    }

    #[test]
    fn single_kind_input_fills_one_group() {
        let legs = vec![
            leg(0, VenueKind::Mixed, TradeType::ExactInput),
            leg(1, VenueKind::Mixed, TradeType::ExactInput),
        ];
        let expected: Vec<RoutedAmounts> = legs.iter().cloned().map(Into::into).collect();
        let agg = compose(legs).unwrap();
        assert!(agg.v2_legs.is_empty());
        assert!(agg.v3_legs.is_empty());
        assert_eq!(agg.mixed_legs, expected);
        assert_eq!(agg.trade_type, TradeType::ExactInput);
    }

    // Documents current behavior: compose takes the first leg's type and
    // does not reject a mismatch further down. Strict callers use
    // uniform_trade_type before composing.
    #[test]
    fn first_leg_wins_on_mixed_trade_types() {
        let legs = vec![
            leg(0, VenueKind::V2, TradeType::ExactInput),
            leg(1, VenueKind::V3, TradeType::ExactOutput),
        ];
        let agg = compose(legs).unwrap();
        assert_eq!(agg.trade_type, TradeType::ExactInput);
        assert_eq!(agg.len(), 2);
    }

    #[test]
    fn v2_plus_v3_exact_input_scenario() {
        let legs = vec![
            leg(0, VenueKind::V2, TradeType::ExactInput),
            leg(1, VenueKind::V3, TradeType::ExactInput),
        ];
        let agg = compose(legs).unwrap();
        assert_eq!(agg.v2_legs.len(), 1);
        assert_eq!(agg.v3_legs.len(), 1);
        assert!(agg.mixed_legs.is_empty());
        assert_eq!(agg.trade_type, TradeType::ExactInput);
    }

    #[test]
    fn uniform_trade_type_accepts_and_rejects() {
        let ok = vec![
            leg(0, VenueKind::V2, TradeType::ExactOutput),
            leg(1, VenueKind::Mixed, TradeType::ExactOutput),
        ];
        assert_eq!(uniform_trade_type(&ok).unwrap(), TradeType::ExactOutput);

        let bad = vec![
            leg(0, VenueKind::V2, TradeType::ExactInput),
            leg(1, VenueKind::V2, TradeType::ExactOutput),
        ];
        assert_eq!(
            uniform_trade_type(&bad).unwrap_err(),
            ComposeError::MixedTradeTypes {
                first: TradeType::ExactInput,
                other: TradeType::ExactOutput,
            }
        );
        assert_eq!(
            uniform_trade_type(&[]).unwrap_err(),
            ComposeError::EmptyLegs
        );
    }

    #[test]
    fn routed_amounts_keep_numeric_content() {
        let source = leg(7, VenueKind::V3, TradeType::ExactInput);
        let routed: RoutedAmounts = source.clone().into();
        assert_eq!(routed.route, source.route);
        assert_eq!(routed.input.raw, U256::from(1_007u64));
        assert_eq!(routed.output.raw, U256::from(2_007u64));
    }

    #[test]
    fn token_helpers() {
        let t = Token::new(
            address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            18,
            "WETH",
        );
        assert_eq!(t.symbol, "WETH");
        assert_eq!(t.decimals, 18);
    }
}
