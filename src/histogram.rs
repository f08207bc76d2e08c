//! A frequency histogram of patients-per-locus.

use std::collections::BTreeMap;

/// A mapping from a patient count to the number of loci observed in that many
/// patients.
///
/// Buckets are kept in ascending order of patient count.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Histogram(BTreeMap<usize, usize>);

impl Histogram {
    /// Creates an empty [`Histogram`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one locus to the bucket for `n_patients`.
    pub(crate) fn increment(&mut self, n_patients: usize) {
        *self.0.entry(n_patients).or_default() += 1;
    }

    /// Gets the number of loci in the bucket for `n_patients`.
    ///
    /// # Examples
    ///
    /// ```
    /// use heterogeneity::Histogram;
    ///
    /// let histogram = [1, 1, 2].into_iter().collect::<Histogram>();
    /// assert_eq!(histogram.get(1), 2);
    /// assert_eq!(histogram.get(3), 0);
    /// ```
    pub fn get(&self, n_patients: usize) -> usize {
        self.0.get(&n_patients).copied().unwrap_or_default()
    }

    /// Gets the total number of loci across all buckets.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Gets the number of non-empty buckets.
    pub fn len(&self) -> usize {
        self.0.values().filter(|count| **count > 0).count()
    }

    /// Returns whether the histogram holds no loci.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Returns an iterator over `(patient count, locus count)` buckets in
    /// ascending order of patient count.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|(n_patients, count)| (*n_patients, *count))
    }

    /// Gets `count` as a percentage of the total number of loci.
    ///
    /// Returns [`None`] when the histogram is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use heterogeneity::Histogram;
    ///
    /// let histogram = [1, 1, 2, 3].into_iter().collect::<Histogram>();
    /// assert_eq!(histogram.percentage(2), Some(50.0));
    /// assert_eq!(Histogram::new().percentage(0), None);
    /// ```
    pub fn percentage(&self, count: usize) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(count as f64 / total as f64 * 100.0),
        }
    }
}

impl FromIterator<usize> for Histogram {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut histogram = Self::new();

        for n_patients in iter {
            histogram.increment(n_patients);
        }

        histogram
    }
}
