//! Pairwise Jaccard similarity between patients.

use std::collections::BTreeSet;

use crate::index::PatientLoci;

/// Computes the Jaccard index between two sets.
///
/// The index is `0.0` when both sets are empty.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
///
/// use heterogeneity::similarity::jaccard;
///
/// let a = BTreeSet::from(["L1", "L2"]);
/// let b = BTreeSet::from(["L1", "L3"]);
/// assert_eq!(jaccard(&a, &b), 1.0 / 3.0);
/// ```
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;

    match union {
        0 => 0.0,
        union => intersection as f64 / union as f64,
    }
}

/// The Jaccard index for one unordered pair of patients.
#[derive(Clone, Debug, PartialEq)]
pub struct Pair<'a> {
    /// The patient that sorts first.
    a: &'a str,
    /// The patient that sorts second.
    b: &'a str,
    /// The Jaccard index between the two patients' loci.
    score: f64,
}

impl<'a> Pair<'a> {
    /// Gets the patient that sorts first.
    pub fn a(&self) -> &'a str {
        self.a
    }

    /// Gets the patient that sorts second.
    pub fn b(&self) -> &'a str {
        self.b
    }

    /// Gets the Jaccard index.
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// An iterator over every unordered pair of distinct patients.
///
/// Pairs are yielded in lexicographic order of the patient identifiers, each
/// exactly once.
#[derive(Debug)]
pub struct Pairs<'a> {
    /// The patients and their loci in ascending order.
    entries: Vec<(&'a str, &'a BTreeSet<String>)>,

    /// The index of the first patient of the next pair.
    i: usize,

    /// The index of the second patient of the next pair.
    j: usize,
}

impl<'a> Pairs<'a> {
    /// Creates a new [`Pairs`] over a patient index.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeSet;
    ///
    /// use heterogeneity::index::PatientLoci;
    /// use heterogeneity::similarity::Pairs;
    ///
    /// let mut patients = PatientLoci::new();
    /// patients.insert(String::from("P1"), BTreeSet::from([String::from("L1")]));
    /// patients.insert(String::from("P2"), BTreeSet::from([String::from("L1")]));
    /// patients.insert(String::from("P3"), BTreeSet::from([String::from("L2")]));
    ///
    /// let pairs = Pairs::new(&patients).collect::<Vec<_>>();
    /// assert_eq!(pairs.len(), 3);
    /// assert_eq!((pairs[0].a(), pairs[0].b()), ("P1", "P2"));
    /// assert_eq!(pairs[0].score(), 1.0);
    /// ```
    pub fn new(patient_loci: &'a PatientLoci) -> Self {
        Self {
            entries: patient_loci
                .iter()
                .map(|(patient, loci)| (patient.as_str(), loci))
                .collect(),
            i: 0,
            j: 1,
        }
    }
}

impl<'a> Iterator for Pairs<'a> {
    type Item = Pair<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.j >= self.entries.len() {
            self.i += 1;
            self.j = self.i + 1;
        }

        if self.j >= self.entries.len() {
            return None;
        }

        let (a, a_loci) = self.entries[self.i];
        let (b, b_loci) = self.entries[self.j];
        self.j += 1;

        Some(Pair {
            a,
            b,
            score: jaccard(a_loci, b_loci),
        })
    }
}

/// The reduction of all pairwise Jaccard indices.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    /// The number of pairs compared.
    pairs: usize,
    /// The arithmetic mean.
    mean: f64,
    /// The minimum.
    min: f64,
    /// The maximum.
    max: f64,
}

impl Summary {
    /// Reduces a stream of scores in a single pass.
    ///
    /// Returns [`None`] if there are no scores.
    ///
    /// # Examples
    ///
    /// ```
    /// use heterogeneity::similarity::Summary;
    ///
    /// let summary = Summary::try_from_scores([0.25, 0.5, 0.75]).unwrap();
    /// assert_eq!(summary.pairs(), 3);
    /// assert_eq!(summary.mean(), 0.5);
    /// assert_eq!((summary.min(), summary.max()), (0.25, 0.75));
    ///
    /// assert!(Summary::try_from_scores(Vec::new()).is_none());
    /// ```
    pub fn try_from_scores(scores: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut scores = scores.into_iter();
        let first = scores.next()?;

        let (pairs, sum, min, max) = scores.fold(
            (1usize, first, first, first),
            |(pairs, sum, min, max), score| {
                (pairs + 1, sum + score, min.min(score), max.max(score))
            },
        );

        Some(Self {
            pairs,
            mean: sum / pairs as f64,
            min,
            max,
        })
    }

    /// Gets the number of pairs compared.
    pub fn pairs(&self) -> usize {
        self.pairs
    }

    /// Gets the mean Jaccard index.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Gets the minimum Jaccard index.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Gets the maximum Jaccard index.
    pub fn max(&self) -> f64 {
        self.max
    }
}

/// The similarity across a cohort.
#[derive(Clone, Debug, PartialEq)]
pub enum Similarity {
    /// Fewer than two patients were present, so there are no pairs to
    /// compare.
    NotComputed {
        /// The number of patients present.
        patients: usize,
    },

    /// The reduction over all pairs.
    Computed(Summary),
}

impl Similarity {
    /// Computes the pairwise similarity across all patients.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeSet;
    ///
    /// use heterogeneity::index::PatientLoci;
    /// use heterogeneity::similarity::Similarity;
    ///
    /// let mut patients = PatientLoci::new();
    /// patients.insert(String::from("P1"), BTreeSet::from([String::from("L1")]));
    ///
    /// assert_eq!(
    ///     Similarity::compute(&patients),
    ///     Similarity::NotComputed { patients: 1 }
    /// );
    /// ```
    pub fn compute(patient_loci: &PatientLoci) -> Self {
        match Summary::try_from_scores(Pairs::new(patient_loci).map(|pair| pair.score())) {
            Some(summary) => Similarity::Computed(summary),
            None => Similarity::NotComputed {
                patients: patient_loci.len(),
            },
        }
    }

    /// Gets the [`Summary`] if one was computed.
    pub fn summary(&self) -> Option<&Summary> {
        match self {
            Similarity::NotComputed { .. } => None,
            Similarity::Computed(summary) => Some(summary),
        }
    }
}
