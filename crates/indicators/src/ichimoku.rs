use crate::rolling::{RollingMax, RollingMin};
use crate::Rolling;
use rust_decimal::Decimal;
use std::collections::VecDeque;

/// Ichimoku leading spans (Senkou Span A and B).
///
/// conversion = (max(high, conv_w) + min(low, conv_w)) / 2
/// base       = (max(high, base_w) + min(low, base_w)) / 2
/// span A     = (conversion + base) / 2, shifted forward by `shift`
/// span B     = (max(high, span_b_w) + min(low, span_b_w)) / 2, same shift
///
/// The shift places the value computed at bar i into bar i + shift, so the
/// first `shift` bars of both span columns are null and values computed in
/// the last `shift` bars never surface.
#[derive(Debug, Clone)]
pub struct IchimokuSpans {
    conv_high: RollingMax,
    conv_low: RollingMin,
    base_high: RollingMax,
    base_low: RollingMin,
    span_b_high: RollingMax,
    span_b_low: RollingMin,
    shift: usize,
    pending_a: VecDeque<Option<Decimal>>,
    pending_b: VecDeque<Option<Decimal>>,
}

/// Span values destined for the current bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct IchimokuOutput {
    pub span_a: Option<Decimal>,
    pub span_b: Option<Decimal>,
}

impl IchimokuSpans {
    pub fn new(conversion: usize, base: usize, span_b: usize, shift: usize) -> Self {
        Self {
            conv_high: RollingMax::new(conversion),
            conv_low: RollingMin::new(conversion),
            base_high: RollingMax::new(base),
            base_low: RollingMin::new(base),
            span_b_high: RollingMax::new(span_b),
            span_b_low: RollingMin::new(span_b),
            shift,
            pending_a: VecDeque::with_capacity(shift + 1),
            pending_b: VecDeque::with_capacity(shift + 1),
        }
    }

    pub fn next_hl(&mut self, high: Option<Decimal>, low: Option<Decimal>) -> IchimokuOutput {
        let conv = midpoint(self.conv_high.next(high), self.conv_low.next(low));
        let base = midpoint(self.base_high.next(high), self.base_low.next(low));
        let raw_a = midpoint(conv, base);
        let raw_b = midpoint(self.span_b_high.next(high), self.span_b_low.next(low));

        self.pending_a.push_back(raw_a);
        self.pending_b.push_back(raw_b);

        // A value surfaces once `shift` further bars have passed.
        let span_a = if self.pending_a.len() > self.shift {
            self.pending_a.pop_front().unwrap_or(None)
        } else {
            None
        };
        let span_b = if self.pending_b.len() > self.shift {
            self.pending_b.pop_front().unwrap_or(None)
        } else {
            None
        };

        IchimokuOutput { span_a, span_b }
    }

    pub fn reset(&mut self) {
        self.conv_high.reset();
        self.conv_low.reset();
        self.base_high.reset();
        self.base_low.reset();
        self.span_b_high.reset();
        self.span_b_low.reset();
        self.pending_a.clear();
        self.pending_b.clear();
    }
}

fn midpoint(a: Option<Decimal>, b: Option<Decimal>) -> Option<Decimal> {
    match (a, b) {
        (Some(a), Some(b)) => Some((a + b) / Decimal::TWO),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_leading_nulls_match_shift() {
        let mut spans = IchimokuSpans::new(2, 3, 4, 3);
        let mut outputs = Vec::new();
        for i in 0..6 {
            let h = dec!(10) + Decimal::from(i);
            let l = dec!(5) + Decimal::from(i);
            outputs.push(spans.next_hl(Some(h), Some(l)));
        }
        // Exactly `shift` leading nulls, then values.
        for out in &outputs[..3] {
            assert!(out.span_a.is_none());
            assert!(out.span_b.is_none());
        }
        for out in &outputs[3..] {
            assert!(out.span_a.is_some());
            assert!(out.span_b.is_some());
        }
    }

    #[test]
    fn test_span_values_are_shifted_midpoints() {
        let mut spans = IchimokuSpans::new(1, 1, 1, 1);
        spans.next_hl(Some(dec!(10)), Some(dec!(6)));
        let out = spans.next_hl(Some(dec!(20)), Some(dec!(12)));
        // With unit windows, conv = base = (10+6)/2 = 8 at bar 0; span A
        // at bar 1 is that bar-0 value.
        assert_eq!(out.span_a, Some(dec!(8)));
        assert_eq!(out.span_b, Some(dec!(8)));
    }

    #[test]
    fn test_null_highs_propagate_after_window_drains() {
        let mut spans = IchimokuSpans::new(2, 2, 2, 1);
        spans.next_hl(Some(dec!(10)), Some(dec!(6)));
        spans.next_hl(None, None);
        // Window still holds the real bar, so the shifted value exists.
        let out = spans.next_hl(None, None);
        assert!(out.span_a.is_some());
        // Now every rolling window is all-null; newly computed raws are null
        // and surface as null after the shift.
        let out = spans.next_hl(None, None);
        assert!(out.span_a.is_none());
    }
}
