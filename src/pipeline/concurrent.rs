//! Concurrent pipeline
//!
//! Each stage runs as its own tokio task, connected by bounded channels:
//!
//! ```text
//! tokenize_stage --symbols--> valuate_stage --values--> reduce_stage
//!                                  |
//!                                  +-- one task per symbol (JoinSet)
//! ```
//!
//! Shutdown is driven by channel closure:
//! - The tokenizer is the only symbol sender; returning drops it and closes
//!   the symbol channel.
//! - The valuator drops its value sender only after every per-symbol task
//!   has been joined, so the value channel closes after the last value.
//! - The reducer drains the value channel until it closes.
//!
//! On a valuation error the reducer returns early and drops its receiver.
//! Upstream stages notice the closed channel and stop.

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, trace, warn};

use super::PipelineStage;
use crate::error::{ConvertError, Result};
use crate::numeral::{Conversion, Reducer, Symbol, Tokenizer, Valuation, Valuator};

/// Run the pipeline as concurrent tasks on the current tokio runtime.
///
/// `channel_capacity` bounds each inter-stage channel; 0 is treated as 1.
pub async fn run_concurrent(
    input: &str,
    valuator: Valuator,
    channel_capacity: usize,
) -> Result<Conversion> {
    let capacity = channel_capacity.max(1);
    let (symbol_tx, symbol_rx) = mpsc::channel(capacity);
    let (value_tx, value_rx) = mpsc::channel(capacity);

    let tokenize_task = tokio::spawn(tokenize_stage(input.to_owned(), symbol_tx));
    let valuate_task = tokio::spawn(valuate_stage(symbol_rx, value_tx, valuator));
    let reduce_task = tokio::spawn(reduce_stage(value_rx));

    // Join every stage before reporting, so no task outlives the call
    let reduced = join_stage(PipelineStage::Reduce, reduce_task).await?;
    join_stage(PipelineStage::Tokenize, tokenize_task).await?;
    join_stage(PipelineStage::Valuate, valuate_task).await??;

    let conversion = reduced?;
    debug!(
        mode = "concurrent",
        capacity,
        symbols = conversion.symbols,
        value = conversion.value,
        "conversion complete"
    );
    Ok(conversion)
}

async fn join_stage<T>(stage: PipelineStage, handle: JoinHandle<T>) -> Result<T> {
    handle
        .await
        .map_err(|source| ConvertError::StageJoin { stage, source })
}

/// Sole producer of symbols. Dropping `symbols` on return closes the channel.
pub(crate) async fn tokenize_stage(input: String, symbols: mpsc::Sender<Symbol<'static>>) {
    let mut emitted = 0usize;
    for symbol in Tokenizer::new(&input) {
        if symbols.send(symbol.into_owned()).await.is_err() {
            debug!(emitted, "symbol receiver closed, tokenizer stopping");
            return;
        }
        emitted += 1;
    }
    debug!(emitted, "tokenizer finished");
}

/// Spawns one valuation task per symbol and forwards results downstream.
///
/// `values` is dropped only after every spawned task has completed.
pub(crate) async fn valuate_stage(
    mut symbols: mpsc::Receiver<Symbol<'static>>,
    values: mpsc::Sender<Result<Valuation>>,
    valuator: Valuator,
) -> Result<()> {
    let mut in_flight = JoinSet::new();

    while let Some(symbol) = symbols.recv().await {
        if values.is_closed() {
            debug!("value receiver closed, valuator stopping");
            break;
        }

        let values = values.clone();
        in_flight.spawn(async move {
            trace!(symbol = symbol.text(), "processing symbol");
            let valuation = valuator.valuate(&symbol);
            // Fails only once the reducer has stopped listening
            let _ = values.send(valuation).await;
        });
    }

    // Closing the receiver makes a still-running tokenizer stop on its next send
    symbols.close();

    let mut completed = 0usize;
    while let Some(joined) = in_flight.join_next().await {
        joined.map_err(|source| ConvertError::StageJoin {
            stage: PipelineStage::Valuate,
            source,
        })?;
        completed += 1;
    }

    debug!(completed, "valuator finished");
    Ok(())
}

/// Sums values until the channel closes; returns early on the first error.
pub(crate) async fn reduce_stage(
    mut values: mpsc::Receiver<Result<Valuation>>,
) -> Result<Conversion> {
    let mut reducer = Reducer::new();

    while let Some(valuation) = values.recv().await {
        match valuation {
            Ok(valuation) => reducer.push(valuation),
            Err(e) => {
                warn!(error = %e, sum = reducer.sum(), "reducer stopping on valuation error");
                return Err(e);
            }
        }
    }

    Ok(reducer.finish())
}
