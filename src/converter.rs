//! Conversion façade
//!
//! [`convert`] is the plain lenient conversion. [`Converter`] adds the
//! configurable pipeline mode and unknown-symbol policy.

use tokio::runtime::Handle;
use tracing::debug;

use crate::config::{ConverterConfig, PipelineMode};
use crate::error::Result;
use crate::numeral::{reduce, valuator, Conversion, Tokenizer, Valuator, Value};
use crate::pipeline::{run_concurrent, run_sequential};

/// Convert a Roman numeral string to its integer value.
///
/// Lenient: symbols are summed as tokenized, without well-formedness
/// checks, and unknown characters count as 0. Empty input yields 0.
///
/// ```rust
/// use roman_pipeline::convert;
///
/// assert_eq!(convert("XIII"), 13);
/// assert_eq!(convert("IIIV"), 6);
/// ```
pub fn convert(input: &str) -> Value {
    let value = reduce(Tokenizer::new(input).map(|symbol| valuator::lookup(symbol.text())));
    debug!(value, "converted numeral");
    value
}

/// Configurable converter. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConverterConfig,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Build from `ROMAN_*` environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ConverterConfig::from_env()?))
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn valuator(&self) -> Valuator {
        Valuator::new(self.config.unknown_symbols)
    }

    pub fn convert(&self, input: &str) -> Result<Value> {
        Ok(self.convert_with_report(input)?.value)
    }

    /// Convert, blocking until the pipeline completes.
    ///
    /// Concurrent mode runs on a private current-thread runtime. When the
    /// caller is already inside a tokio runtime, that private runtime lives
    /// on a scoped helper thread, since a runtime cannot block on another
    /// from one of its own threads. Async callers should prefer
    /// [`Converter::convert_async`], which does not block a worker.
    pub fn convert_with_report(&self, input: &str) -> Result<Conversion> {
        match self.config.mode {
            PipelineMode::Sequential => run_sequential(input, &self.valuator()),
            PipelineMode::Concurrent if Handle::try_current().is_ok() => {
                debug!("tokio runtime active, running pipeline on a helper thread");
                std::thread::scope(|scope| {
                    scope
                        .spawn(|| self.block_on_private_runtime(input))
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
            }
            PipelineMode::Concurrent => self.block_on_private_runtime(input),
        }
    }

    fn block_on_private_runtime(&self, input: &str) -> Result<Conversion> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(run_concurrent(
            input,
            self.valuator(),
            self.config.channel_capacity,
        ))
    }

    /// Convert on the caller's tokio runtime
    pub async fn convert_async(&self, input: &str) -> Result<Conversion> {
        match self.config.mode {
            PipelineMode::Sequential => run_sequential(input, &self.valuator()),
            PipelineMode::Concurrent => {
                run_concurrent(input, self.valuator(), self.config.channel_capacity).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use crate::numeral::UnknownSymbolPolicy;

    fn concurrent() -> Converter {
        Converter::new(ConverterConfig::default().with_mode(PipelineMode::Concurrent))
    }

    #[test]
    fn test_convert_free_function() {
        assert_eq!(convert(""), 0);
        assert_eq!(convert("MCMXCIV"), 1994);
        assert_eq!(convert("M?M"), 2000);
    }

    #[test]
    fn test_converter_modes_agree() {
        let sequential = Converter::default();
        let concurrent = concurrent();
        for input in ["", "IV", "IIIV", "LVII", "MCMXCIV", "MMXXVI", "X-Y-Z"] {
            assert_eq!(
                sequential.convert(input).unwrap(),
                concurrent.convert(input).unwrap(),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_converter_strict() {
        let converter = Converter::new(
            ConverterConfig::default().with_unknown_symbols(UnknownSymbolPolicy::Reject),
        );
        assert_eq!(converter.convert("XIV").unwrap(), 14);
        assert!(matches!(
            converter.convert("XIV!"),
            Err(ConvertError::UnrecognizedSymbol { offset: 3, .. })
        ));
    }

    #[test]
    fn test_converter_is_stateless() {
        let converter = concurrent();
        let first = converter.convert_with_report("MDCLXVI").unwrap();
        let second = converter.convert_with_report("MDCLXVI").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.value, 1666);
    }

    #[tokio::test]
    async fn test_sync_convert_inside_current_thread_runtime() {
        let converter = concurrent();
        assert_eq!(converter.convert("XIV").unwrap(), 14);
        assert_eq!(converter.convert_with_report("MCMXCIV").unwrap().value, 1994);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_sync_convert_inside_multi_thread_runtime() {
        let converter = concurrent();
        assert_eq!(converter.convert("XIV").unwrap(), 14);

        let strict = Converter::new(
            ConverterConfig::default()
                .with_mode(PipelineMode::Concurrent)
                .with_unknown_symbols(UnknownSymbolPolicy::Reject),
        );
        assert!(matches!(
            strict.convert("XQ"),
            Err(ConvertError::UnrecognizedSymbol { offset: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_convert_async() {
        let report = concurrent().convert_async("XLII").await.unwrap();
        assert_eq!(report.value, 42);
        assert_eq!(report.symbols, 3);

        let report = Converter::default().convert_async("XLII").await.unwrap();
        assert_eq!(report.value, 42);
    }
}
