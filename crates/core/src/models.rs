use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// One row as it arrives from a tabular source, before any coercion.
///
/// Every value field is an optional string: sources routinely deliver empty
/// cells, stray text, or locale-mangled numbers, and the normalizer (not the
/// loader) decides what degrades to null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBar {
    pub date: String,
    pub ticker: String,
    pub open: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
    pub close: Option<String>,
    pub volume: Option<String>,
}

// ---------------------------------------------------------------------------
// Market data
// ---------------------------------------------------------------------------

/// A single daily OHLCV bar for one ticker.
///
/// Numeric fields are nullable: placeholder future rows carry no prices, and
/// malformed source values are coerced to null by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub ticker: String,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub close: Option<Decimal>,
    pub volume: Option<i64>,
}

impl Bar {
    /// A placeholder bar for a forecast date: date and ticker set, all
    /// OHLCV fields null.
    pub fn placeholder(ticker: &str, date: NaiveDate) -> Self {
        Self {
            date,
            ticker: ticker.to_string(),
            open: None,
            high: None,
            low: None,
            close: None,
            volume: None,
        }
    }

    /// Whether this bar carries no price data at all.
    pub fn is_placeholder(&self) -> bool {
        self.open.is_none()
            && self.high.is_none()
            && self.low.is_none()
            && self.close.is_none()
            && self.volume.is_none()
    }
}

// ---------------------------------------------------------------------------
// Bollinger breakout flag
// ---------------------------------------------------------------------------

/// Categorical Bollinger breakout label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BbFlag {
    /// max(close, open) broke above the upper band.
    #[serde(rename = "BBH")]
    BreakoutHigh,
    /// min(close, open) broke below the lower band.
    #[serde(rename = "BBL")]
    BreakoutLow,
}

impl std::fmt::Display for BbFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BbFlag::BreakoutHigh => write!(f, "BBH"),
            BbFlag::BreakoutLow => write!(f, "BBL"),
        }
    }
}

// ---------------------------------------------------------------------------
// Enriched output
// ---------------------------------------------------------------------------

/// A bar augmented with every derived indicator column.
///
/// Field order matches the enriched CSV schema; serde names are the exact
/// output column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Open")]
    pub open: Option<Decimal>,
    #[serde(rename = "High")]
    pub high: Option<Decimal>,
    #[serde(rename = "Low")]
    pub low: Option<Decimal>,
    #[serde(rename = "Close")]
    pub close: Option<Decimal>,
    #[serde(rename = "Volume")]
    pub volume: Option<i64>,
    #[serde(rename = "SMA_9")]
    pub sma_9: Option<Decimal>,
    #[serde(rename = "SMA_22")]
    pub sma_22: Option<Decimal>,
    #[serde(rename = "SMA_50")]
    pub sma_50: Option<Decimal>,
    #[serde(rename = "SMA_200")]
    pub sma_200: Option<Decimal>,
    #[serde(rename = "STD_22")]
    pub std_22: Option<Decimal>,
    #[serde(rename = "BB_Upper")]
    pub bb_upper: Option<Decimal>,
    #[serde(rename = "BB_Lower")]
    pub bb_lower: Option<Decimal>,
    #[serde(rename = "BB_Flag")]
    pub bb_flag: Option<BbFlag>,
    #[serde(rename = "RSI_14")]
    pub rsi_14: Option<Decimal>,
    #[serde(rename = "Senkou_Span_A")]
    pub senkou_span_a: Option<Decimal>,
    #[serde(rename = "Senkou_Span_B")]
    pub senkou_span_b: Option<Decimal>,
    #[serde(rename = "Knoxville_Divergence")]
    pub knoxville_divergence: Option<String>,
}

impl IndicatorRow {
    /// An enriched row with every derived column still null.
    pub fn from_bar(bar: Bar) -> Self {
        Self {
            date: bar.date,
            ticker: bar.ticker,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            sma_9: None,
            sma_22: None,
            sma_50: None,
            sma_200: None,
            std_22: None,
            bb_upper: None,
            bb_lower: None,
            bb_flag: None,
            rsi_14: None,
            senkou_span_a: None,
            senkou_span_b: None,
            knoxville_divergence: None,
        }
    }
}
