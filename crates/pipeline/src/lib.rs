pub mod calendar;
pub mod normalize;

use chrono::NaiveDate;
use marketlens_core::{Bar, IndicatorConfig, IndicatorRow, RawBar};
use marketlens_indicators::bollinger::{classify_breakout, BollingerBands};
use marketlens_indicators::divergence::DivergenceDetector;
use marketlens_indicators::ichimoku::IchimokuSpans;
use marketlens_indicators::rolling::RollingMean;
use marketlens_indicators::rsi::Rsi;
use marketlens_indicators::Rolling;
use std::collections::BTreeMap;
use tracing::info;

/// Run the full pipeline over raw source rows: normalize, extend with
/// future business days, enrich per ticker.
pub fn run(
    raw: Vec<RawBar>,
    future_days: usize,
    as_of: Option<NaiveDate>,
    config: &IndicatorConfig,
) -> Vec<IndicatorRow> {
    let bars = normalize::normalize(raw);
    compute_indicators_as_of(bars, future_days, as_of, config)
}

/// Enrich an already-typed table, anchoring the forecast scaffold on the
/// maximum date present.
pub fn compute_indicators(
    bars: Vec<Bar>,
    future_days: usize,
    config: &IndicatorConfig,
) -> Vec<IndicatorRow> {
    compute_indicators_as_of(bars, future_days, None, config)
}

/// Enrich an already-typed table with an explicit as-of anchor.
///
/// Each ticker's series is processed independently in one streaming pass;
/// the result is one table ordered by (ticker, date). Pure apart from
/// tracing events.
pub fn compute_indicators_as_of(
    bars: Vec<Bar>,
    future_days: usize,
    as_of: Option<NaiveDate>,
    config: &IndicatorConfig,
) -> Vec<IndicatorRow> {
    let input_rows = bars.len();
    let placeholders = calendar::extend_with_placeholders(&bars, future_days, as_of);

    let mut series: BTreeMap<String, Vec<Bar>> = BTreeMap::new();
    for bar in bars.into_iter().chain(placeholders) {
        series.entry(bar.ticker.clone()).or_default().push(bar);
    }

    info!(
        tickers = series.len(),
        input_rows, future_days, "computing indicators"
    );

    let mut out = Vec::with_capacity(input_rows + future_days * series.len());
    for (_, mut ticker_bars) in series {
        // Chronological order is the precondition for every rolling window.
        ticker_bars.sort_by_key(|b| b.date);
        out.extend(enrich_series(ticker_bars, config));
    }
    out
}

/// One streaming pass over a single ticker's bars, oldest first.
fn enrich_series(bars: Vec<Bar>, config: &IndicatorConfig) -> Vec<IndicatorRow> {
    let mut smas: Vec<(usize, RollingMean)> = config
        .sma_windows
        .iter()
        .map(|&w| (w, RollingMean::new(w)))
        .collect();
    let mut bollinger = BollingerBands::new(config.bollinger_window, config.bollinger_num_std);
    let mut rsi = Rsi::new(config.rsi_period);
    let mut ichimoku = IchimokuSpans::new(
        config.ichimoku_conversion,
        config.ichimoku_base,
        config.ichimoku_span_b,
        config.span_shift(),
    );
    let mut divergence = DivergenceDetector::new(
        config.momentum_lookback,
        config.rsi_oversold,
        config.rsi_overbought,
    );

    let mut rows = Vec::with_capacity(bars.len());
    for bar in bars {
        let close = bar.close;
        let open = bar.open;
        let high = bar.high;
        let low = bar.low;
        let mut row = IndicatorRow::from_bar(bar);

        for (window, mean) in &mut smas {
            let value = mean.next(close);
            // Only the canonical windows materialize as columns.
            match *window {
                9 => row.sma_9 = value,
                22 => row.sma_22 = value,
                50 => row.sma_50 = value,
                200 => row.sma_200 = value,
                _ => {}
            }
        }

        let bands = bollinger.next(close);
        row.std_22 = bands.std_dev;
        row.bb_upper = bands.upper;
        row.bb_lower = bands.lower;
        row.bb_flag = classify_breakout(open, close, bands.upper, bands.lower);

        row.rsi_14 = rsi.next(close);

        let spans = ichimoku.next_hl(high, low);
        row.senkou_span_a = spans.span_a;
        row.senkou_span_b = spans.span_b;

        row.knoxville_divergence = divergence.next(close, row.rsi_14);

        rows.push(row);
    }
    rows
}
