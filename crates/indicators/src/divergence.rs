use rust_decimal::Decimal;
use std::collections::VecDeque;

/// Where the detector stands inside a divergence episode.
#[derive(Debug, Clone, PartialEq)]
pub enum DivergenceState {
    Idle,
    /// A bullish episode is open; holds the close at the opening bar.
    BullishOpen { start_price: Decimal },
    /// A bearish episode is open; holds the close at the opening bar.
    BearishOpen { start_price: Decimal },
}

/// Knoxville divergence detector.
///
/// Single-pass scan over one ticker's bars in chronological order. A bar is
/// labeled from the state entering that bar; at most one transition fires
/// per bar and nothing is revisited. An episode left open at the end of the
/// series is never force-closed.
///
/// Momentum is close[i] − close[i − lookback], null while the lookback bar
/// is missing or either close is null. Null RSI or momentum satisfies no
/// transition condition.
#[derive(Debug, Clone)]
pub struct DivergenceDetector {
    lookback: usize,
    oversold: Decimal,
    overbought: Decimal,
    closes: VecDeque<Option<Decimal>>,
    state: DivergenceState,
}

impl DivergenceDetector {
    pub fn new(lookback: usize, oversold: u32, overbought: u32) -> Self {
        assert!(lookback > 0, "momentum lookback must be > 0");
        Self {
            lookback,
            oversold: Decimal::from(oversold),
            overbought: Decimal::from(overbought),
            closes: VecDeque::with_capacity(lookback + 1),
            state: DivergenceState::Idle,
        }
    }

    /// Advance one bar and return its episode label, if any.
    pub fn next(&mut self, close: Option<Decimal>, rsi: Option<Decimal>) -> Option<String> {
        let momentum = self.push_close(close);

        match self.state.clone() {
            DivergenceState::Idle => {
                let (rsi, momentum, close) = match (rsi, momentum, close) {
                    (Some(r), Some(m), Some(c)) => (r, m, c),
                    _ => return None,
                };
                if rsi < self.oversold && momentum > Decimal::ZERO {
                    self.state = DivergenceState::BullishOpen { start_price: close };
                    Some("Bullish Start".to_string())
                } else if rsi > self.overbought && momentum < Decimal::ZERO {
                    self.state = DivergenceState::BearishOpen { start_price: close };
                    Some("Bearish Start".to_string())
                } else {
                    None
                }
            }
            DivergenceState::BullishOpen { start_price } => {
                match (momentum, close) {
                    (Some(m), Some(end_price)) if m < Decimal::ZERO => {
                        self.state = DivergenceState::Idle;
                        Some(format!("Bullish End ({start_price}→{end_price})"))
                    }
                    _ => None,
                }
            }
            DivergenceState::BearishOpen { start_price } => {
                match (momentum, close) {
                    (Some(m), Some(end_price)) if m > Decimal::ZERO => {
                        self.state = DivergenceState::Idle;
                        Some(format!("Bearish End ({start_price}→{end_price})"))
                    }
                    _ => None,
                }
            }
        }
    }

    pub fn state(&self) -> &DivergenceState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.closes.clear();
        self.state = DivergenceState::Idle;
    }

    /// Record the close and return the momentum for the current bar.
    fn push_close(&mut self, close: Option<Decimal>) -> Option<Decimal> {
        self.closes.push_back(close);
        if self.closes.len() > self.lookback + 1 {
            self.closes.pop_front();
        }
        if self.closes.len() < self.lookback + 1 {
            return None;
        }
        match (close, self.closes.front().copied().flatten()) {
            (Some(cur), Some(old)) => Some(cur - old),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn detector() -> DivergenceDetector {
        DivergenceDetector::new(2, 30, 70)
    }

    #[test]
    fn test_bullish_episode_start_and_end() {
        let mut d = detector();
        // Warm up the lookback buffer.
        assert_eq!(d.next(Some(dec!(100)), Some(dec!(50))), None);
        assert_eq!(d.next(Some(dec!(101)), Some(dec!(50))), None);
        // momentum = 105 - 100 > 0 with oversold RSI: episode opens.
        assert_eq!(
            d.next(Some(dec!(105)), Some(dec!(25))),
            Some("Bullish Start".to_string())
        );
        assert_eq!(*d.state(), DivergenceState::BullishOpen { start_price: dec!(105) });
        // momentum = 98 - 101 < 0: episode closes with literal prices.
        assert_eq!(
            d.next(Some(dec!(98)), Some(dec!(40))),
            Some("Bullish End (105→98)".to_string())
        );
        assert_eq!(*d.state(), DivergenceState::Idle);
    }

    #[test]
    fn test_bearish_episode_start_and_end() {
        let mut d = detector();
        d.next(Some(dec!(100)), Some(dec!(50)));
        d.next(Some(dec!(99)), Some(dec!(50)));
        // momentum = 95 - 100 < 0 with overbought RSI.
        assert_eq!(
            d.next(Some(dec!(95)), Some(dec!(75))),
            Some("Bearish Start".to_string())
        );
        // momentum = 102 - 99 > 0.
        assert_eq!(
            d.next(Some(dec!(102)), Some(dec!(60))),
            Some("Bearish End (95→102)".to_string())
        );
    }

    #[test]
    fn test_open_episode_is_never_force_closed() {
        let mut d = detector();
        d.next(Some(dec!(100)), Some(dec!(50)));
        d.next(Some(dec!(101)), Some(dec!(50)));
        assert_eq!(
            d.next(Some(dec!(105)), Some(dec!(25))),
            Some("Bullish Start".to_string())
        );
        // Momentum stays positive to the end of the series: no label.
        assert_eq!(d.next(Some(dec!(110)), Some(dec!(28))), None);
        assert_eq!(d.next(Some(dec!(115)), Some(dec!(29))), None);
        assert!(matches!(*d.state(), DivergenceState::BullishOpen { .. }));
    }

    #[test]
    fn test_one_transition_per_bar() {
        let mut d = detector();
        d.next(Some(dec!(100)), Some(dec!(50)));
        d.next(Some(dec!(101)), Some(dec!(50)));
        d.next(Some(dec!(105)), Some(dec!(25)));
        // Closing bar also satisfies the bearish-open condition (RSI > 70,
        // momentum < 0); only the close fires, the open must wait.
        assert_eq!(
            d.next(Some(dec!(98)), Some(dec!(80))),
            Some("Bullish End (105→98)".to_string())
        );
        assert_eq!(*d.state(), DivergenceState::Idle);
    }

    #[test]
    fn test_null_inputs_freeze_the_machine() {
        let mut d = detector();
        d.next(Some(dec!(100)), Some(dec!(50)));
        d.next(Some(dec!(101)), Some(dec!(50)));
        d.next(Some(dec!(105)), Some(dec!(25)));
        // Null close: momentum undefined, open episode holds.
        assert_eq!(d.next(None, Some(dec!(20))), None);
        assert!(matches!(*d.state(), DivergenceState::BullishOpen { .. }));
        // Null RSI in Idle would equally satisfy nothing.
        let mut idle = detector();
        idle.next(Some(dec!(100)), Some(dec!(50)));
        idle.next(Some(dec!(101)), Some(dec!(50)));
        assert_eq!(idle.next(Some(dec!(105)), None), None);
        assert_eq!(*idle.state(), DivergenceState::Idle);
    }
}
