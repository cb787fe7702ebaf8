/// Running min/avg/max over a stream of samples.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Tracker {
    pub ct: usize,
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl Tracker {
    pub fn update(&mut self, next: f64) {
        let prev = self.ct as f64;
        self.ct += 1;

        if self.ct == 1 {
            self.min = next;
            self.avg = next;
            self.max = next;

            return;
        }

        let curr = self.ct as f64;

        self.min = self.min.min(next);
        self.avg = (self.avg * prev + next) / curr;
        self.max = self.max.max(next);
    }

    /// Whether `max / min` exceeds `threshold`.
    ///
    /// A zero minimum counts as an unbounded ratio unless every sample is zero.
    pub fn spread_exceeds(&self, threshold: f64) -> bool {
        if self.ct == 0 {
            return false;
        }
        if self.min <= 0.0 {
            return self.max > 0.0;
        }
        self.max / self.min > threshold
    }
}

impl FromIterator<f64> for Tracker {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut tracker = Tracker::default();
        for next in iter {
            tracker.update(next);
        }
        tracker
    }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Render a sparsity level the way it appears in the results table, e.g. `1.0`
/// or `1e-05`.
///
/// Exponents carry a sign and at least two digits.
pub fn fmt_sparsity(sparsity: f64) -> String {
    let repr = format!("{sparsity:?}");
    let Some((mantissa, exponent)) = repr.split_once('e') else {
        return repr;
    };

    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_samples() {
        let tracker: Tracker = [0.5, 2.0, 0.25, 1.25].into_iter().collect();
        assert_eq!(tracker.ct, 4);
        assert_eq!(tracker.min, 0.25);
        assert_eq!(tracker.max, 2.0);
        assert!((tracker.avg - 1.0).abs() < 1e-12);
    }

    #[test]
    fn spread() {
        let narrow: Tracker = [1.0, 10.0].into_iter().collect();
        assert!(!narrow.spread_exceeds(10.0));

        let wide: Tracker = [1.0, 10.5].into_iter().collect();
        assert!(wide.spread_exceeds(10.0));

        let from_zero: Tracker = [0.0, 0.001].into_iter().collect();
        assert!(from_zero.spread_exceeds(10.0));

        let zeros: Tracker = [0.0, 0.0].into_iter().collect();
        assert!(!zeros.spread_exceeds(10.0));

        assert!(!Tracker::default().spread_exceeds(10.0));
    }

    #[test]
    fn capitalize_labels() {
        assert_eq!(capitalize("dense-dense"), "Dense-dense");
        assert_eq!(capitalize("SPARSE-Dense"), "Sparse-dense");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn sparsity_labels() {
        assert_eq!(fmt_sparsity(1.0), "1.0");
        assert_eq!(fmt_sparsity(0.1), "0.1");
        assert_eq!(fmt_sparsity(0.01), "0.01");
        assert_eq!(fmt_sparsity(0.0001), "0.0001");
        assert_eq!(fmt_sparsity(0.00001), "1e-05");
        assert_eq!(fmt_sparsity(2.5e-7), "2.5e-07");
        assert_eq!(fmt_sparsity(1e16), "1e+16");
        assert_eq!(fmt_sparsity(1e-100), "1e-100");
    }
}
