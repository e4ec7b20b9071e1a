use chrono::NaiveDate;
use marketlens_core::{Bar, RawBar};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

/// Coerce raw rows into typed bars sorted by (ticker, date).
///
/// Malformed numeric values degrade to null with a data-quality warning;
/// they never abort the run. A row whose date cannot be parsed is dropped —
/// the date is the ordering key and has no null representation. Duplicate
/// (ticker, date) rows collapse to the last occurrence, matching a source
/// that re-appends refreshed downloads. A hole in a ticker's business-day
/// sequence is logged and computation proceeds; the rolling windows span it.
pub fn normalize(raw: Vec<RawBar>) -> Vec<Bar> {
    let mut bars: Vec<Bar> = Vec::with_capacity(raw.len());
    for row in raw {
        let date = match parse_date(&row.date) {
            Some(d) => d,
            None => {
                warn!(ticker = %row.ticker, value = %row.date, "dropping row with unparseable date");
                continue;
            }
        };
        bars.push(Bar {
            date,
            ticker: row.ticker.trim().to_string(),
            open: coerce_price(row.open.as_deref(), "Open", &row.ticker),
            high: coerce_price(row.high.as_deref(), "High", &row.ticker),
            low: coerce_price(row.low.as_deref(), "Low", &row.ticker),
            close: coerce_price(row.close.as_deref(), "Close", &row.ticker),
            volume: coerce_volume(row.volume.as_deref(), &row.ticker),
        });
    }

    bars.sort_by(|a, b| a.ticker.cmp(&b.ticker).then(a.date.cmp(&b.date)));
    bars.dedup_by(|next, prev| {
        // sorted, so duplicates are adjacent; `next` is the later-read row
        // and the swap moves it into the retained slot before dropping
        if next.ticker == prev.ticker && next.date == prev.date {
            warn!(ticker = %prev.ticker, date = %prev.date, "duplicate row collapsed");
            std::mem::swap(next, prev);
            true
        } else {
            false
        }
    });

    for (ticker, from, to) in detect_date_gaps(&bars) {
        warn!(%ticker, %from, %to, "gap in dates");
    }
    bars
}

/// Consecutive same-ticker rows whose dates are not adjacent business days.
///
/// A weekend between Friday and Monday is not a gap; a missing weekday is.
fn detect_date_gaps(bars: &[Bar]) -> Vec<(&str, NaiveDate, NaiveDate)> {
    let mut gaps = Vec::new();
    for pair in bars.windows(2) {
        if pair[0].ticker != pair[1].ticker {
            continue;
        }
        let next_business_day = crate::calendar::future_business_days(pair[0].date, 1);
        if let Some(expected) = next_business_day.first() {
            if pair[1].date > *expected {
                gaps.push((pair[0].ticker.as_str(), pair[0].date, pair[1].date));
            }
        }
    }
    gaps
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    // Timestamps with a time component: take the date part.
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    None
}

fn coerce_price(s: Option<&str>, field: &str, ticker: &str) -> Option<Decimal> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    match Decimal::from_str(s) {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(%ticker, field, value = %s, "non-numeric value coerced to null");
            None
        }
    }
}

fn coerce_volume(s: Option<&str>, ticker: &str) -> Option<i64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    // Sources occasionally serialize volume as a decimal ("12345.0").
    match Decimal::from_str(s).ok().and_then(|d| d.trunc().to_i64()) {
        Some(v) => Some(v),
        None => {
            warn!(%ticker, field = "Volume", value = %s, "non-numeric value coerced to null");
            None
        }
    }
}
