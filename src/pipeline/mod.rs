//! Stage orchestration
//!
//! Tokenizer -> Valuator -> Reducer, run either as one lazy iterator chain
//! ([`run_sequential`]) or as tokio tasks joined by channels
//! ([`run_concurrent`]). Both runners return the same [`Conversion`] for
//! the same input.

pub mod concurrent;

use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::numeral::{Conversion, Reducer, Tokenizer, Valuator};

pub use concurrent::run_concurrent;

/// Pipeline stage names, used in logs and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Tokenize,
    Valuate,
    Reduce,
}

impl PipelineStage {
    pub fn name(&self) -> &'static str {
        match self {
            PipelineStage::Tokenize => "tokenize",
            PipelineStage::Valuate => "valuate",
            PipelineStage::Reduce => "reduce",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run all three stages in a single pass on the calling thread.
///
/// Stops at the first valuation error (strict policy only).
pub fn run_sequential(input: &str, valuator: &Valuator) -> Result<Conversion> {
    let mut reducer = Reducer::new();
    for symbol in Tokenizer::new(input) {
        reducer.push(valuator.valuate(&symbol)?);
    }

    let conversion = reducer.finish();
    debug!(
        mode = "sequential",
        symbols = conversion.symbols,
        value = conversion.value,
        "conversion complete"
    );
    Ok(conversion)
}
