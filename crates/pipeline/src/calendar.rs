use chrono::{Datelike, NaiveDate, Weekday};
use marketlens_core::Bar;
use std::collections::BTreeSet;

/// The next `n` business days strictly after `anchor`.
///
/// Business day = Monday through Friday; no holiday calendar. A weekend
/// anchor still yields the following Monday as day 1, never the literal
/// next calendar day.
pub fn future_business_days(anchor: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(n);
    let mut day = anchor;
    while dates.len() < n {
        day = match day.succ_opt() {
            Some(next) => next,
            None => break, // end of the calendar
        };
        if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        dates.push(day);
    }
    dates
}

/// Placeholder bars for `future_days` business days past the anchor, one per
/// future date for every distinct ticker in the input. The anchor is the
/// caller-supplied as-of date or the maximum date across all tickers,
/// whichever is later: a stale as-of must never generate forecast dates
/// that collide with historical rows.
///
/// Pure: returns only the new rows, never touches the input.
pub fn extend_with_placeholders(
    bars: &[Bar],
    future_days: usize,
    as_of: Option<NaiveDate>,
) -> Vec<Bar> {
    let data_max = bars.iter().map(|b| b.date).max();
    let anchor = match (as_of, data_max) {
        (Some(a), Some(m)) => a.max(m),
        (Some(a), None) => a,
        (None, Some(m)) => m,
        (None, None) => return Vec::new(), // empty input, nothing to anchor on
    };

    let tickers: BTreeSet<&str> = bars.iter().map(|b| b.ticker.as_str()).collect();
    let dates = future_business_days(anchor, future_days);

    let mut placeholders = Vec::with_capacity(tickers.len() * dates.len());
    for ticker in tickers {
        for date in &dates {
            placeholders.push(Bar::placeholder(ticker, *date));
        }
    }
    placeholders
}
