use crate::rolling::{RollingMean, RollingStd};
use crate::Rolling;
use marketlens_core::BbFlag;
use rust_decimal::Decimal;

/// Bollinger Bands over a nullable close series.
///
/// Middle band = rolling mean, upper/lower = middle ± num_std · rolling
/// sample deviation. Each band is null wherever its rolling input is null.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    num_std: Decimal,
    mean: RollingMean,
    std: RollingStd,
}

/// Bollinger Bands output for one bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct BollingerOutput {
    pub middle: Option<Decimal>,
    pub std_dev: Option<Decimal>,
    pub upper: Option<Decimal>,
    pub lower: Option<Decimal>,
}

impl BollingerBands {
    pub fn new(window: usize, num_std: u32) -> Self {
        Self {
            num_std: Decimal::from(num_std),
            mean: RollingMean::new(window),
            std: RollingStd::new(window),
        }
    }

    pub fn next(&mut self, close: Option<Decimal>) -> BollingerOutput {
        let middle = self.mean.next(close);
        let std_dev = self.std.next(close);

        let (upper, lower) = match (middle, std_dev) {
            (Some(m), Some(sd)) => {
                let width = self.num_std * sd;
                (Some(m + width), Some(m - width))
            }
            _ => (None, None),
        };

        BollingerOutput {
            middle,
            std_dev,
            upper,
            lower,
        }
    }

    pub fn reset(&mut self) {
        self.mean.reset();
        self.std.reset();
    }
}

/// Classify one bar against the bands.
///
/// Null when any input is null. Otherwise BBH when the body top pierces the
/// upper band, else BBL when the body bottom pierces the lower band. The
/// upper check runs first, so the flags are mutually exclusive.
pub fn classify_breakout(
    open: Option<Decimal>,
    close: Option<Decimal>,
    upper: Option<Decimal>,
    lower: Option<Decimal>,
) -> Option<BbFlag> {
    let (open, close, upper, lower) = match (open, close, upper, lower) {
        (Some(o), Some(c), Some(u), Some(l)) => (o, c, u, l),
        _ => return None,
    };

    if close.max(open) > upper {
        Some(BbFlag::BreakoutHigh)
    } else if close.min(open) < lower {
        Some(BbFlag::BreakoutLow)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bands_track_mean() {
        let mut bb = BollingerBands::new(3, 2);
        assert!(bb.next(Some(dec!(10))).upper.is_none()); // std undefined at one obs
        let out = bb.next(Some(dec!(12)));
        assert_eq!(out.middle, Some(dec!(11)));
        assert!(out.upper.unwrap() > dec!(11));
        assert!(out.lower.unwrap() < dec!(11));
    }

    #[test]
    fn test_bands_null_close_keeps_window_alive() {
        let mut bb = BollingerBands::new(3, 2);
        bb.next(Some(dec!(10)));
        bb.next(Some(dec!(12)));
        let out = bb.next(None);
        // Two real observations still in the window.
        assert_eq!(out.middle, Some(dec!(11)));
        assert!(out.upper.is_some());
    }

    #[test]
    fn test_breakout_high_wins_ties() {
        // Pathological bands where both conditions hold: upper check first.
        let flag = classify_breakout(
            Some(dec!(1)),
            Some(dec!(100)),
            Some(dec!(50)),
            Some(dec!(40)),
        );
        assert_eq!(flag, Some(BbFlag::BreakoutHigh));
    }

    #[test]
    fn test_breakout_low() {
        let flag = classify_breakout(
            Some(dec!(30)),
            Some(dec!(35)),
            Some(dec!(50)),
            Some(dec!(32)),
        );
        assert_eq!(flag, Some(BbFlag::BreakoutLow));
    }

    #[test]
    fn test_no_breakout_inside_bands() {
        let flag = classify_breakout(
            Some(dec!(45)),
            Some(dec!(46)),
            Some(dec!(50)),
            Some(dec!(40)),
        );
        assert_eq!(flag, None);
    }

    #[test]
    fn test_null_input_means_null_flag() {
        assert_eq!(
            classify_breakout(None, Some(dec!(46)), Some(dec!(50)), Some(dec!(40))),
            None
        );
        assert_eq!(
            classify_breakout(Some(dec!(45)), Some(dec!(46)), None, Some(dec!(40))),
            None
        );
    }
}
