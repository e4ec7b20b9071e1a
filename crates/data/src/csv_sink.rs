use marketlens_core::{DataError, IndicatorRow};
use std::io;
use std::path::Path;

/// Write the enriched table to a CSV file, one header row plus one record
/// per indicator row. Nulls serialize as empty fields.
pub fn write_indicator_rows(path: &Path, rows: &[IndicatorRow]) -> Result<(), DataError> {
    let file = std::fs::File::create(path)?;
    write_rows(file, rows)
}

/// Writer-based variant of [`write_indicator_rows`].
pub fn write_rows<W: io::Write>(writer: W, rows: &[IndicatorRow]) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| DataError::ParseError(format!("CSV write error: {}", e)))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use marketlens_core::{Bar, BbFlag};
    use rust_decimal_macros::dec;

    fn sample_row() -> IndicatorRow {
        let mut row = IndicatorRow::from_bar(Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            ticker: "AAA".to_string(),
            open: Some(dec!(10)),
            high: Some(dec!(12)),
            low: Some(dec!(9)),
            close: Some(dec!(11)),
            volume: Some(1000),
        });
        row.sma_22 = Some(dec!(10.5));
        row.bb_flag = Some(BbFlag::BreakoutHigh);
        row.knoxville_divergence = Some("Bullish Start".to_string());
        row
    }

    #[test]
    fn test_header_matches_schema() {
        let mut buf = Vec::new();
        write_rows(&mut buf, &[sample_row()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "Date,Ticker,Open,High,Low,Close,Volume,SMA_9,SMA_22,SMA_50,SMA_200,\
             STD_22,BB_Upper,BB_Lower,BB_Flag,RSI_14,Senkou_Span_A,Senkou_Span_B,\
             Knoxville_Divergence"
        );
    }

    #[test]
    fn test_nulls_serialize_as_empty_fields() {
        let mut buf = Vec::new();
        write_rows(&mut buf, &[sample_row()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let record = text.lines().nth(1).unwrap();
        assert!(record.starts_with("2024-01-02,AAA,10,12,9,11,1000,,10.5,,,"));
        assert!(record.contains("BBH"));
        assert!(record.ends_with("Bullish Start"));
    }
}
