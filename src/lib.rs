//! roman-pipeline - Roman numeral to integer conversion
//!
//! Conversion runs as a three-stage pipeline:
//! Input -> Tokenizer (symbols) -> Valuator (values) -> Reducer (sum)
//!
//! ## Quick Start
//!
//! ```rust
//! use roman_pipeline::convert;
//!
//! assert_eq!(convert("MCMXCIV"), 1994);
//! assert_eq!(convert(""), 0);
//! ```
//!
//! ## Lenient Parsing
//!
//! Numerals are summed exactly as tokenized: "IIII" is 4 and "IIIV" is 6.
//! Characters outside the symbol table contribute 0. A strict policy that
//! rejects unknown symbols is available through [`ConverterConfig`], but
//! numeral well-formedness is never checked.
//!
//! ## Execution Modes
//!
//! [`PipelineMode::Sequential`] (default) runs all stages as one iterator
//! chain. [`PipelineMode::Concurrent`] runs each stage as a tokio task
//! connected by channels, with one task per symbol valuation. Both modes
//! produce identical results.

// Core error handling
pub mod error;

// Configuration
pub mod config;

// Numeral stages: table, tokenizer, valuator, reducer
pub mod numeral;

// Stage orchestration (sequential and concurrent)
pub mod pipeline;

// Conversion façade
pub mod converter;

// Re-export commonly used types
pub use config::{ConverterConfig, PipelineMode};
pub use converter::{convert, Converter};
pub use error::{ConfigError, ConvertError, Result};
pub use numeral::{
    reduce, symbol_table, value_of, Conversion, Reducer, Symbol, Tokenizer, UnknownSymbolPolicy,
    Valuation, Valuator, Value,
};
pub use pipeline::{run_concurrent, run_sequential, PipelineStage};
