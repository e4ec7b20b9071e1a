pub mod csv_source;
pub mod csv_sink;

pub use csv_sink::write_indicator_rows;
pub use csv_source::load_raw_bars;
