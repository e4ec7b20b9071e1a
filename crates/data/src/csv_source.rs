use marketlens_core::{DataError, RawBar};
use std::io;
use std::path::Path;

/// Load raw multi-ticker bars from a CSV file.
///
/// Expected columns (case-insensitive, flexible ordering):
/// `Date`, `Ticker`, `Open`, `High`, `Low`, `Close`, `Volume`.
///
/// Every column must be present — a missing one is a fatal schema error —
/// but individual values stay untyped here; coercion belongs to the
/// normalizer.
pub fn load_raw_bars(path: &Path) -> Result<Vec<RawBar>, DataError> {
    if !path.exists() {
        return Err(DataError::NotFound(format!(
            "CSV file not found: {}",
            path.display()
        )));
    }
    let file = std::fs::File::open(path)?;
    read_raw_bars(file)
}

/// Reader-based variant of [`load_raw_bars`].
pub fn read_raw_bars<R: io::Read>(reader: R) -> Result<Vec<RawBar>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DataError::ParseError(format!("Failed to read headers: {}", e)))?
        .clone();

    let cols = resolve_columns(&headers)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record =
            result.map_err(|e| DataError::ParseError(format!("CSV record error: {}", e)))?;
        rows.push(RawBar {
            date: field(&record, cols.date).unwrap_or_default(),
            ticker: field(&record, cols.ticker).unwrap_or_default(),
            open: field(&record, cols.open),
            high: field(&record, cols.high),
            low: field(&record, cols.low),
            close: field(&record, cols.close),
            volume: field(&record, cols.volume),
        });
    }
    Ok(rows)
}

struct ColumnMap {
    date: usize,
    ticker: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<ColumnMap, DataError> {
    let require = |names: &[&str], canonical: &str| {
        find_column(headers, names).ok_or_else(|| DataError::MissingColumn(canonical.to_string()))
    };

    Ok(ColumnMap {
        date: require(&["date", "datetime", "timestamp"], "Date")?,
        ticker: require(&["ticker", "symbol"], "Ticker")?,
        open: require(&["open", "o"], "Open")?,
        high: require(&["high", "h"], "High")?,
        low: require(&["low", "l"], "Low")?,
        close: require(&["close", "c"], "Close")?,
        volume: require(&["volume", "vol", "v"], "Volume")?,
    })
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    for (i, header) in headers.iter().enumerate() {
        let h = header.trim().to_lowercase();
        for name in names {
            if h == *name {
                return Some(i);
            }
        }
    }
    None
}

fn field(record: &csv::StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
