use crate::rolling::RollingMean;
use crate::Rolling;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Relative Strength Index over a rolling mean of gains and losses.
///
/// A null delta (first bar, or a null close on either side) contributes a
/// zero gain and a zero loss, so the averages stay defined across gaps and
/// placeholder rows. When the average loss is zero the RSI clamps to 100 if
/// any gain remains, and is null on a fully flat window.
#[derive(Debug, Clone)]
pub struct Rsi {
    prev_close: Option<Decimal>,
    avg_gain: RollingMean,
    avg_loss: RollingMean,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "RSI period must be > 0");
        Self {
            prev_close: None,
            avg_gain: RollingMean::new(period),
            avg_loss: RollingMean::new(period),
        }
    }

    pub fn next(&mut self, close: Option<Decimal>) -> Option<Decimal> {
        let delta = match (close, self.prev_close) {
            (Some(cur), Some(prev)) => Some(cur - prev),
            _ => None,
        };
        self.prev_close = close;

        let (gain, loss) = match delta {
            Some(d) if d > Decimal::ZERO => (d, Decimal::ZERO),
            Some(d) if d < Decimal::ZERO => (Decimal::ZERO, -d),
            _ => (Decimal::ZERO, Decimal::ZERO),
        };

        let avg_gain = self.avg_gain.next(Some(gain));
        let avg_loss = self.avg_loss.next(Some(loss));

        match (avg_gain, avg_loss) {
            (Some(ag), Some(al)) => {
                if al.is_zero() {
                    if ag > Decimal::ZERO {
                        Some(dec!(100))
                    } else {
                        None
                    }
                } else {
                    let rs = ag / al;
                    Some(dec!(100) - (dec!(100) / (Decimal::ONE + rs)))
                }
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.prev_close = None;
        self.avg_gain.reset();
        self.avg_loss.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rsi_in_range() {
        let mut rsi = Rsi::new(14);
        let values = [
            dec!(44), dec!(44.34), dec!(44.09), dec!(43.61), dec!(44.33),
            dec!(44.83), dec!(45.10), dec!(45.42), dec!(45.84), dec!(46.08),
            dec!(45.89), dec!(46.03), dec!(45.61), dec!(46.28), dec!(46.28),
        ];
        let mut result = None;
        for v in &values {
            result = rsi.next(Some(*v));
        }
        let rsi_val = result.unwrap();
        assert!(rsi_val > Decimal::ZERO && rsi_val < dec!(100));
    }

    #[test]
    fn test_rsi_null_on_first_bar() {
        let mut rsi = Rsi::new(14);
        // No delta yet: gain = loss = 0, RSI undefined.
        assert_eq!(rsi.next(Some(dec!(50))), None);
    }

    #[test]
    fn test_rsi_clamps_to_100_on_pure_gains() {
        let mut rsi = Rsi::new(3);
        rsi.next(Some(dec!(10)));
        rsi.next(Some(dec!(11)));
        assert_eq!(rsi.next(Some(dec!(12))), Some(dec!(100)));
    }

    #[test]
    fn test_rsi_null_on_flat_series() {
        let mut rsi = Rsi::new(14);
        let mut result = Some(Decimal::ZERO);
        for _ in 0..20 {
            result = rsi.next(Some(dec!(42)));
        }
        assert_eq!(result, None);
    }

    #[test]
    fn test_rsi_zero_on_pure_losses() {
        let mut rsi = Rsi::new(3);
        rsi.next(Some(dec!(12)));
        rsi.next(Some(dec!(11)));
        rsi.next(Some(dec!(10)));
        let v = rsi.next(Some(dec!(9))).unwrap();
        assert_eq!(v, Decimal::ZERO);
    }

    #[test]
    fn test_rsi_survives_null_gap() {
        let mut rsi = Rsi::new(3);
        rsi.next(Some(dec!(10)));
        rsi.next(Some(dec!(12)));
        // The gap contributes (0, 0) on both sides of the null.
        let after_gap = rsi.next(None);
        assert!(after_gap.is_some());
        assert!(rsi.next(Some(dec!(13))).is_some());
    }
}
