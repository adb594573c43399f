//! Sum reduction
//!
//! The reducer folds every valuation into a single total. It has no notion
//! of order, so it accepts values from concurrent valuators as they arrive.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::table::Value;
use super::valuator::Valuation;

/// Final result of one conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Conversion {
    /// Sum of all symbol values
    pub value: Value,
    /// Number of symbols reduced
    pub symbols: usize,
    /// Symbols with no table entry (counted as 0)
    pub unrecognized: usize,
}

/// Running sum over valuations
#[derive(Debug, Default)]
pub struct Reducer {
    sum: Value,
    symbols: usize,
    unrecognized: usize,
}

impl Reducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, valuation: Valuation) {
        trace!(value = valuation.value, sum = self.sum, "adding value");
        self.sum += valuation.value;
        self.symbols += 1;
        if !valuation.recognized {
            self.unrecognized += 1;
        }
    }

    /// Sum so far
    pub fn sum(&self) -> Value {
        self.sum
    }

    pub fn finish(self) -> Conversion {
        Conversion {
            value: self.sum,
            symbols: self.symbols,
            unrecognized: self.unrecognized,
        }
    }
}

impl Extend<Valuation> for Reducer {
    fn extend<I: IntoIterator<Item = Valuation>>(&mut self, iter: I) {
        for valuation in iter {
            self.push(valuation);
        }
    }
}

/// Sum plain values, starting from 0
pub fn reduce<I: IntoIterator<Item = Value>>(values: I) -> Value {
    values.into_iter().fold(0, |sum, value| {
        trace!(value, sum, "adding value");
        sum + value
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_all_symbol_values() {
        let values = [1000, 500, 100, 50, 10, 5, 1, 4, 9, 40, 90, 400, 900];
        let expected = 1000 + 500 + 100 + 50 + 10 + 5 + 1 + 4 + 9 + 40 + 90 + 400 + 900;
        assert_eq!(expected, 3109);
        assert_eq!(reduce(values), expected);
    }

    #[test]
    fn test_reduce_empty() {
        assert_eq!(reduce(std::iter::empty()), 0);
        assert_eq!(Reducer::new().finish(), Conversion::default());
    }

    #[test]
    fn test_reducer_counts_unrecognized() {
        let mut reducer = Reducer::new();
        reducer.extend([
            Valuation {
                value: 10,
                recognized: true,
            },
            Valuation {
                value: 0,
                recognized: false,
            },
            Valuation {
                value: 4,
                recognized: true,
            },
        ]);
        assert_eq!(reducer.sum(), 14);
        assert_eq!(
            reducer.finish(),
            Conversion {
                value: 14,
                symbols: 3,
                unrecognized: 1,
            }
        );
    }

    #[test]
    fn test_conversion_serializes() {
        let conversion = Conversion {
            value: 1994,
            symbols: 4,
            unrecognized: 0,
        };
        let json = serde_json::to_value(conversion).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"value": 1994, "symbols": 4, "unrecognized": 0})
        );
    }
}
