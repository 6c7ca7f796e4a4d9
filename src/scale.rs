//! Linear scales mapping data domains to pixel ranges.

/// A linear mapping from a data domain to a pixel range.
///
/// Mirrors the conventional continuous scale used by charting toolkits:
/// `apply` interpolates linearly between the range endpoints, and a
/// degenerate (zero-span) domain maps every input to the range midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value into the pixel range.
    pub fn apply(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return (self.range.0 + self.range.1) / 2.0;
        }
        let t = (value - self.domain.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_endpoints_and_midpoint() {
        let s = LinearScale::new((0.0, 10.0), (0.0, 1000.0));
        assert_eq!(s.apply(0.0), 0.0);
        assert_eq!(s.apply(10.0), 1000.0);
        assert_eq!(s.apply(5.0), 500.0);
    }

    #[test]
    fn extrapolates_outside_domain() {
        let s = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(s.apply(-1.0), -10.0);
        assert_eq!(s.apply(11.0), 110.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_midpoint() {
        let s = LinearScale::new((3.0, 3.0), (0.0, 100.0));
        assert_eq!(s.apply(3.0), 50.0);
        assert_eq!(s.apply(42.0), 50.0);
    }

    #[test]
    fn offset_domain() {
        let s = LinearScale::new((10.0, 20.0), (100.0, 200.0));
        assert_eq!(s.apply(15.0), 150.0);
    }
}
