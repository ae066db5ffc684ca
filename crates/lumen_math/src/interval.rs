/// Range of ray parameters, used to accept or reject intersections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Everything at or beyond `min`.
    pub const fn beyond(min: f64) -> Self {
        Self::new(min, f64::INFINITY)
    }

    /// `min < x < max`. False for NaN, and for `x` equal to an infinite bound.
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Smallest of `candidates` strictly inside the interval.
    pub fn nearest(&self, candidates: impl IntoIterator<Item = f64>) -> Option<f64> {
        candidates
            .into_iter()
            .filter(|&x| self.surrounds(x))
            .min_by(f64::total_cmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let range = Interval::new(0.0, 10.0);
        assert!(!range.surrounds(0.0) && !range.surrounds(10.0));
        assert!(range.surrounds(5.0));
        assert!(!range.surrounds(f64::NAN));
        assert!(!range.surrounds(10.1));
    }

    #[test]
    fn test_open_ended() {
        let range = Interval::beyond(0.001);
        assert!(range.surrounds(1e300));
        assert!(!range.surrounds(f64::INFINITY));
        assert!(!range.surrounds(0.0005));
    }

    #[test]
    fn test_nearest() {
        let range = Interval::beyond(0.001);
        assert_eq!(range.nearest([4.0, -1.0, 2.5]), Some(2.5));
        assert_eq!(range.nearest([0.0001, 3.0]), Some(3.0));
        assert_eq!(range.nearest([f64::NAN, -2.0]), None);
    }
}
