use crate::Rolling;
use rust_decimal::Decimal;
use std::collections::VecDeque;

/// Rolling arithmetic mean with a minimum-periods-of-one policy.
///
/// The mean is taken over the non-null values in the trailing window; it is
/// null only when the window holds no non-null value at all.
#[derive(Debug, Clone)]
pub struct RollingMean {
    len: usize,
    buffer: VecDeque<Option<Decimal>>,
    sum: Decimal,
    count: usize,
}

impl RollingMean {
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "rolling window must be > 0");
        Self {
            len: window,
            buffer: VecDeque::with_capacity(window + 1),
            sum: Decimal::ZERO,
            count: 0,
        }
    }

    /// Current mean without advancing the window.
    pub fn value(&self) -> Option<Decimal> {
        if self.count > 0 {
            Some(self.sum / Decimal::from(self.count))
        } else {
            None
        }
    }
}

impl Rolling for RollingMean {
    fn next(&mut self, value: Option<Decimal>) -> Option<Decimal> {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
        self.buffer.push_back(value);

        if self.buffer.len() > self.len {
            if let Some(Some(removed)) = self.buffer.pop_front() {
                self.sum -= removed;
                self.count -= 1;
            }
        }

        self.value()
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.sum = Decimal::ZERO;
        self.count = 0;
    }

    fn window(&self) -> usize {
        self.len
    }

    fn is_full(&self) -> bool {
        self.buffer.len() == self.len
    }
}

/// Rolling sample standard deviation (n − 1 divisor).
///
/// Null while the window holds fewer than two non-null values; the sample
/// deviation of a single observation is undefined.
#[derive(Debug, Clone)]
pub struct RollingStd {
    len: usize,
    buffer: VecDeque<Option<Decimal>>,
}

impl RollingStd {
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "rolling window must be > 0");
        Self {
            len: window,
            buffer: VecDeque::with_capacity(window + 1),
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        let values: Vec<Decimal> = self.buffer.iter().flatten().copied().collect();
        if values.len() < 2 {
            return None;
        }
        let n = Decimal::from(values.len());
        let mean = values.iter().sum::<Decimal>() / n;
        let sum_sq: Decimal = values
            .iter()
            .map(|v| {
                let diff = *v - mean;
                diff * diff
            })
            .sum();
        let variance = sum_sq / (n - Decimal::ONE);
        Some(decimal_sqrt(variance))
    }
}

impl Rolling for RollingStd {
    fn next(&mut self, value: Option<Decimal>) -> Option<Decimal> {
        self.buffer.push_back(value);
        if self.buffer.len() > self.len {
            self.buffer.pop_front();
        }
        self.value()
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn window(&self) -> usize {
        self.len
    }

    fn is_full(&self) -> bool {
        self.buffer.len() == self.len
    }
}

/// Rolling maximum of the non-null values in the trailing window.
#[derive(Debug, Clone)]
pub struct RollingMax {
    len: usize,
    buffer: VecDeque<Option<Decimal>>,
}

impl RollingMax {
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "rolling window must be > 0");
        Self {
            len: window,
            buffer: VecDeque::with_capacity(window + 1),
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        self.buffer.iter().flatten().max().copied()
    }
}

impl Rolling for RollingMax {
    fn next(&mut self, value: Option<Decimal>) -> Option<Decimal> {
        self.buffer.push_back(value);
        if self.buffer.len() > self.len {
            self.buffer.pop_front();
        }
        self.value()
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn window(&self) -> usize {
        self.len
    }

    fn is_full(&self) -> bool {
        self.buffer.len() == self.len
    }
}

/// Rolling minimum of the non-null values in the trailing window.
#[derive(Debug, Clone)]
pub struct RollingMin {
    len: usize,
    buffer: VecDeque<Option<Decimal>>,
}

impl RollingMin {
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "rolling window must be > 0");
        Self {
            len: window,
            buffer: VecDeque::with_capacity(window + 1),
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        self.buffer.iter().flatten().min().copied()
    }
}

impl Rolling for RollingMin {
    fn next(&mut self, value: Option<Decimal>) -> Option<Decimal> {
        self.buffer.push_back(value);
        if self.buffer.len() > self.len {
            self.buffer.pop_front();
        }
        self.value()
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn window(&self) -> usize {
        self.len
    }

    fn is_full(&self) -> bool {
        self.buffer.len() == self.len
    }
}

/// Newton's method square root for Decimal.
pub fn decimal_sqrt(value: Decimal) -> Decimal {
    if value.is_zero() || value < Decimal::ZERO {
        return Decimal::ZERO;
    }
    let mut guess = value / Decimal::TWO;
    if guess.is_zero() {
        guess = value;
    }
    let epsilon = Decimal::new(1, 10); // 0.0000000001
    for _ in 0..100 {
        let next_guess = (guess + value / guess) / Decimal::TWO;
        let diff = (next_guess - guess).abs();
        guess = next_guess;
        if diff < epsilon {
            break;
        }
    }
    guess
}
