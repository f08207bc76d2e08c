//! Shannon diversity over a patients-per-locus [`Histogram`].
//!
//! The entropy is always computed with the natural logarithm. Callers needing
//! another base should divide by the logarithm of that base.

use crate::Histogram;

/// The diversity of a histogram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Diversity {
    /// The histogram held no loci, so there is no distribution to measure.
    Trivial,

    /// The Shannon entropy (in nats) of the distribution.
    Entropy(f64),
}

impl Diversity {
    /// Computes the Shannon entropy of a histogram.
    ///
    /// # Examples
    ///
    /// ```
    /// use heterogeneity::Histogram;
    /// use heterogeneity::diversity::Diversity;
    ///
    /// let histogram = [1, 2].into_iter().collect::<Histogram>();
    /// let entropy = Diversity::shannon(&histogram).value();
    /// assert!((entropy - std::f64::consts::LN_2).abs() < 1e-12);
    ///
    /// assert_eq!(Diversity::shannon(&Histogram::new()), Diversity::Trivial);
    /// ```
    pub fn shannon(histogram: &Histogram) -> Self {
        let total = histogram.total();

        if total == 0 {
            return Diversity::Trivial;
        }

        let entropy = histogram
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(_, count)| count as f64 / total as f64)
            .fold(0.0, |entropy, p| entropy - p * p.ln());

        Diversity::Entropy(entropy)
    }

    /// Gets the entropy, which is `0.0` when [`Diversity::Trivial`].
    pub fn value(&self) -> f64 {
        match self {
            Diversity::Trivial => 0.0,
            Diversity::Entropy(entropy) => *entropy,
        }
    }

    /// Returns whether the diversity is [`Diversity::Trivial`].
    pub fn is_trivial(&self) -> bool {
        matches!(self, Diversity::Trivial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_a() {
        let histogram = [1, 1, 2].into_iter().collect::<Histogram>();
        let expected =
            -((2.0f64 / 3.0) * (2.0f64 / 3.0).ln() + (1.0f64 / 3.0) * (1.0f64 / 3.0).ln());

        let entropy = Diversity::shannon(&histogram).value();
        assert!((entropy - expected).abs() < 1e-12);
        assert!((entropy - 0.6365).abs() < 1e-4);
    }

    #[test]
    fn test_single_bucket_is_zero_but_not_trivial() {
        let histogram = [3, 3, 3].into_iter().collect::<Histogram>();
        let diversity = Diversity::shannon(&histogram);

        assert_eq!(diversity, Diversity::Entropy(0.0));
        assert!(!diversity.is_trivial());
        assert!(diversity.value().is_sign_positive());
    }

    #[test]
    fn test_empty_is_trivial() {
        let diversity = Diversity::shannon(&Histogram::new());
        assert!(diversity.is_trivial());
        assert_eq!(diversity.value(), 0.0);
    }

    #[test]
    fn test_uniform_distribution() {
        let histogram = [0, 1, 2, 3].into_iter().collect::<Histogram>();
        let entropy = Diversity::shannon(&histogram).value();
        assert!((entropy - 4f64.ln()).abs() < 1e-12);
    }
}
