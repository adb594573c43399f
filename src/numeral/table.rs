//! Symbol table
//!
//! Maps the smallest Roman numeral units, including the six subtractive
//! pairs, to their integer values. Built once on first use and read-only
//! afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Integer value of a symbol or a sum of symbols
pub type Value = u64;

const ENTRIES: [(&str, Value); 13] = [
    ("I", 1),
    ("V", 5),
    ("X", 10),
    ("L", 50),
    ("C", 100),
    ("D", 500),
    ("M", 1000),
    ("IV", 4),
    ("IX", 9),
    ("XL", 40),
    ("XC", 90),
    ("CD", 400),
    ("CM", 900),
];

static SYMBOL_TABLE: LazyLock<HashMap<&'static str, Value>> =
    LazyLock::new(|| ENTRIES.into_iter().collect());

/// The full symbol table
pub fn symbol_table() -> &'static HashMap<&'static str, Value> {
    &SYMBOL_TABLE
}

/// Look up a symbol. Returns `None` for anything outside the 13 entries.
pub fn value_of(symbol: &str) -> Option<Value> {
    SYMBOL_TABLE.get(symbol).copied()
}

/// Table entries in definition order (singles, then subtractive pairs)
pub fn entries() -> impl Iterator<Item = (&'static str, Value)> {
    ENTRIES.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_complete() {
        let expected = [
            ("I", 1),
            ("V", 5),
            ("X", 10),
            ("L", 50),
            ("C", 100),
            ("D", 500),
            ("M", 1000),
            ("IV", 4),
            ("IX", 9),
            ("XL", 40),
            ("XC", 90),
            ("CD", 400),
            ("CM", 900),
        ];

        assert_eq!(symbol_table().len(), 13);
        for (symbol, value) in expected {
            assert_eq!(
                value_of(symbol),
                Some(value),
                "Value for roman numeral {:?} wrong",
                symbol
            );
        }
    }

    #[test]
    fn test_unknown_symbols() {
        assert_eq!(value_of(""), None);
        assert_eq!(value_of("Z"), None);
        assert_eq!(value_of("i"), None);
        assert_eq!(value_of("IL"), None);
        assert_eq!(value_of("MM"), None);
    }

    #[test]
    fn test_entries_order() {
        let symbols: Vec<_> = entries().map(|(s, _)| s).collect();
        assert_eq!(&symbols[..7], &["I", "V", "X", "L", "C", "D", "M"]);
        assert_eq!(&symbols[7..], &["IV", "IX", "XL", "XC", "CD", "CM"]);
    }
}
