pub mod bollinger;
pub mod divergence;
pub mod ichimoku;
pub mod rolling;
pub mod rsi;

use rust_decimal::Decimal;

/// Trait for streaming rolling statistics over a nullable daily series.
///
/// Feed one value per bar, null included; the window advances on every call
/// so that placeholder and malformed bars still consume a slot, exactly as
/// the bar they stand for would. The statistic is taken over the non-null
/// values currently in the window.
pub trait Rolling: Send + Sync {
    /// Advance the window by one bar and return the current statistic.
    fn next(&mut self, value: Option<Decimal>) -> Option<Decimal>;

    /// Reset to the initial (empty-window) state.
    fn reset(&mut self);

    /// The window length in bars.
    fn window(&self) -> usize;

    /// Whether the window has seen at least `window()` bars.
    fn is_full(&self) -> bool;
}
