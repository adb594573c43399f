//! Symbol valuation
//!
//! Looks each symbol up in the symbol table. Every symbol is valued
//! independently, so valuations may complete in any order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::table::{value_of, Value};
use super::tokenizer::Symbol;
use crate::error::{ConfigError, ConvertError, Result};

/// What to do with a symbol that has no table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownSymbolPolicy {
    /// Count it as 0 (default, lenient)
    #[default]
    Zero,
    /// Fail the conversion with [`ConvertError::UnrecognizedSymbol`]
    Reject,
}

impl UnknownSymbolPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            UnknownSymbolPolicy::Zero => "zero",
            UnknownSymbolPolicy::Reject => "reject",
        }
    }
}

impl FromStr for UnknownSymbolPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zero" | "lenient" => Ok(UnknownSymbolPolicy::Zero),
            "reject" | "strict" => Ok(UnknownSymbolPolicy::Reject),
            other => Err(ConfigError::invalid(
                "unknown symbol policy",
                other,
                "one of zero, lenient, reject, strict",
            )),
        }
    }
}

impl fmt::Display for UnknownSymbolPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Valuation {
    pub value: Value,
    /// False when the symbol had no table entry and was counted as 0
    pub recognized: bool,
}

/// Maps symbols to values
#[derive(Debug, Clone, Copy, Default)]
pub struct Valuator {
    policy: UnknownSymbolPolicy,
}

impl Valuator {
    pub fn new(policy: UnknownSymbolPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnknownSymbolPolicy {
        self.policy
    }

    pub fn valuate(&self, symbol: &Symbol<'_>) -> Result<Valuation> {
        let valuation = match value_of(symbol.text()) {
            Some(value) => Valuation {
                value,
                recognized: true,
            },
            None if self.policy == UnknownSymbolPolicy::Reject => {
                return Err(ConvertError::UnrecognizedSymbol {
                    symbol: symbol.text().to_string(),
                    offset: symbol.offset(),
                });
            }
            None => Valuation {
                value: 0,
                recognized: false,
            },
        };

        trace!(
            symbol = symbol.text(),
            value = valuation.value,
            recognized = valuation.recognized,
            "valuated symbol"
        );
        Ok(valuation)
    }
}

/// Lenient lookup: table value, or 0 for unknown symbols
pub fn lookup(symbol: &str) -> Value {
    value_of(symbol).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeral::Tokenizer;

    #[test]
    fn test_values_independent_of_order() {
        let mut input = vec![
            "M", "D", "C", "L", "X", "V", "I", "IV", "IX", "XL", "XC", "CD", "CM",
        ];
        input.reverse();
        input.swap(2, 9);

        let valuator = Valuator::default();
        let mut values: Vec<Value> = input
            .iter()
            .map(|s| valuator.valuate(&Symbol::new(*s, 0)).unwrap().value)
            .collect();
        values.sort_unstable();

        let mut expected = vec![1000, 500, 100, 50, 10, 5, 1, 4, 9, 40, 90, 400, 900];
        expected.sort_unstable();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_unknown_symbol_counts_zero() {
        let valuation = Valuator::default()
            .valuate(&Symbol::new("Z", 4))
            .unwrap();
        assert_eq!(
            valuation,
            Valuation {
                value: 0,
                recognized: false
            }
        );
        assert_eq!(lookup("Z"), 0);
        assert_eq!(lookup("CM"), 900);
    }

    #[test]
    fn test_reject_policy() {
        let valuator = Valuator::new(UnknownSymbolPolicy::Reject);
        let symbols: Vec<_> = Tokenizer::new("XIQ").collect();

        assert_eq!(valuator.valuate(&symbols[0]).unwrap().value, 10);
        match valuator.valuate(&symbols[2]) {
            Err(ConvertError::UnrecognizedSymbol { symbol, offset }) => {
                assert_eq!(symbol, "Q");
                assert_eq!(offset, 2);
            }
            other => panic!("Expected UnrecognizedSymbol, got {:?}", other),
        }
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "zero".parse::<UnknownSymbolPolicy>().unwrap(),
            UnknownSymbolPolicy::Zero
        );
        assert_eq!(
            "STRICT".parse::<UnknownSymbolPolicy>().unwrap(),
            UnknownSymbolPolicy::Reject
        );
        assert!("drop".parse::<UnknownSymbolPolicy>().is_err());
        assert_eq!(UnknownSymbolPolicy::default(), UnknownSymbolPolicy::Zero);
    }
}
