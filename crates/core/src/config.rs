use serde::{Deserialize, Serialize};

/// Number of future business days appended to every ticker's series.
pub const DEFAULT_FUTURE_DAYS: usize = 26;

/// The canonical window set for one pipeline run.
///
/// The source data this pipeline replaced mixed two window conventions
/// (9/22/26/52 and 9/20/50/200). This struct pins one consistent set; any
/// deviation is a deliberate per-run override, never a silent mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Simple moving average windows, one output column per entry.
    pub sma_windows: Vec<usize>,
    /// Window for the rolling standard deviation and the Bollinger basis.
    pub bollinger_window: usize,
    /// Band half-width in standard deviations.
    pub bollinger_num_std: u32,
    /// RSI lookback.
    pub rsi_period: usize,
    /// Ichimoku conversion-line window.
    pub ichimoku_conversion: usize,
    /// Ichimoku base-line window; also the forward shift of both spans.
    pub ichimoku_base: usize,
    /// Ichimoku span-B window.
    pub ichimoku_span_b: usize,
    /// Momentum lookback for the divergence detector.
    pub momentum_lookback: usize,
    /// RSI level below which a bullish divergence may open.
    pub rsi_oversold: u32,
    /// RSI level above which a bearish divergence may open.
    pub rsi_overbought: u32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_windows: vec![9, 22, 50, 200],
            bollinger_window: 22,
            bollinger_num_std: 2,
            rsi_period: 14,
            ichimoku_conversion: 9,
            ichimoku_base: 26,
            ichimoku_span_b: 52,
            momentum_lookback: 20,
            rsi_oversold: 30,
            rsi_overbought: 70,
        }
    }
}

impl IndicatorConfig {
    /// Forward shift applied to both Senkou spans.
    pub fn span_shift(&self) -> usize {
        self.ichimoku_base
    }
}
