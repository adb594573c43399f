//! Numeral stages
//!
//! Each stage is usable on its own. The [`crate::pipeline`] module wires
//! them together.

pub mod reducer;
pub mod table;
pub mod tokenizer;
pub mod valuator;

pub use reducer::{reduce, Conversion, Reducer};
pub use table::{symbol_table, value_of, Value};
pub use tokenizer::{Symbol, Tokenizer};
pub use valuator::{UnknownSymbolPolicy, Valuation, Valuator};
