//! Inverted indices over a set of locus records.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use tracing::warn;

use crate::Histogram;
use crate::record::Record;

/// A mapping from patient identifier to the set of loci observed in that
/// patient.
pub type PatientLoci = BTreeMap<String, BTreeSet<String>>;

/// A mapping from locus identifier to the set of patients sharing it.
pub type LocusPatients = BTreeMap<String, BTreeSet<String>>;

/// How the stored `n_patients` value of a record is treated when filling the
/// [`Histogram`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CountPolicy {
    /// Use the stored count as-is, warning when it disagrees with the parsed
    /// patient list.
    #[default]
    Trust,

    /// Reject any record whose stored count disagrees with the parsed patient
    /// list.
    Validate,

    /// Ignore the stored count and use the number of distinct parsed
    /// patients.
    Recompute,
}

/// An error related to building an [`Index`].
#[derive(Debug)]
pub enum Error {
    /// The stored patient count for a locus does not match its patient list.
    ///
    /// Holds the locus, the stored count, and the number of distinct patients
    /// parsed.
    IncorrectPatientCount(String, usize, usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IncorrectPatientCount(locus, stored, parsed) => write!(
                f,
                "incorrect patient count for locus {locus}: n_patients is {stored}, but {parsed} \
                 distinct patients are listed"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// The patient and locus indices for a single cohort table.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Index {
    /// The loci observed in each patient.
    patient_loci: PatientLoci,

    /// The patients sharing each locus.
    locus_patients: LocusPatients,

    /// The patients-per-locus histogram.
    histogram: Histogram,
}

impl Index {
    /// Attempts to build an [`Index`] from records.
    ///
    /// # Examples
    ///
    /// ```
    /// use heterogeneity::index::CountPolicy;
    /// use heterogeneity::index::Index;
    /// use heterogeneity::record::Record;
    ///
    /// let records = vec![
    ///     Record::try_from_fields("L1", "2", "P1,P2")?,
    ///     Record::try_from_fields("L2", "1", "P1")?,
    /// ];
    ///
    /// let index = Index::try_from_records(records, CountPolicy::Trust)?;
    /// assert_eq!(index.num_patients(), 2);
    /// assert_eq!(index.patient_loci()["P1"].len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_records<I>(records: I, policy: CountPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut builder = Builder::new(policy);

        for record in records {
            builder.push(&record)?;
        }

        Ok(builder.build())
    }

    /// Gets the loci observed in each patient.
    pub fn patient_loci(&self) -> &PatientLoci {
        &self.patient_loci
    }

    /// Gets the patients sharing each locus.
    pub fn locus_patients(&self) -> &LocusPatients {
        &self.locus_patients
    }

    /// Gets the patients-per-locus histogram.
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Gets the number of distinct patients.
    pub fn num_patients(&self) -> usize {
        self.patient_loci.len()
    }

    /// Gets the number of distinct locus identifiers.
    pub fn num_loci(&self) -> usize {
        self.locus_patients.len()
    }

    /// Gets the number of loci observed in exactly one patient.
    pub fn unique_loci(&self) -> usize {
        self.locus_patients
            .values()
            .filter(|patients| patients.len() == 1)
            .count()
    }

    /// Gets the number of loci observed in every patient.
    ///
    /// This is always zero for a cohort without patients.
    pub fn shared_loci(&self) -> usize {
        let n = self.num_patients();

        if n == 0 {
            return 0;
        }

        self.locus_patients
            .values()
            .filter(|patients| patients.len() == n)
            .count()
    }

    /// Gets the mean number of loci per patient.
    ///
    /// [`None`] is returned for a cohort without patients.
    pub fn loci_per_patient(&self) -> Option<f64> {
        match self.num_patients() {
            0 => None,
            n => {
                let total = self.patient_loci.values().map(BTreeSet::len).sum::<usize>();
                Some(total as f64 / n as f64)
            }
        }
    }
}

/// A builder for an [`Index`].
#[derive(Debug, Default)]
pub struct Builder {
    /// The count policy.
    policy: CountPolicy,

    /// The loci observed in each patient so far.
    patient_loci: PatientLoci,

    /// The patients sharing each locus so far.
    locus_patients: LocusPatients,

    /// The histogram so far.
    histogram: Histogram,
}

impl Builder {
    /// Creates a new [`Builder`] with the given [`CountPolicy`].
    pub fn new(policy: CountPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Adds a record to the indices.
    ///
    /// If the locus identifier was already seen, its patient set is replaced.
    pub fn push(&mut self, record: &Record) -> Result<()> {
        let patients = record
            .distinct_patients()
            .into_iter()
            .map(String::from)
            .collect::<BTreeSet<_>>();

        let n_patients = match self.policy {
            CountPolicy::Trust => {
                if record.n_patients() != patients.len() {
                    warn!(
                        "locus {} stores n_patients = {} but lists {} distinct patients",
                        record.locus(),
                        record.n_patients(),
                        patients.len()
                    );
                }

                record.n_patients()
            }
            CountPolicy::Validate => {
                if record.n_patients() != patients.len() {
                    return Err(Error::IncorrectPatientCount(
                        record.locus().into(),
                        record.n_patients(),
                        patients.len(),
                    ));
                }

                record.n_patients()
            }
            CountPolicy::Recompute => patients.len(),
        };

        for patient in &patients {
            self.patient_loci
                .entry(patient.clone())
                .or_default()
                .insert(record.locus().into());
        }

        if self
            .locus_patients
            .insert(record.locus().into(), patients)
            .is_some()
        {
            warn!("duplicate locus identifier: {}", record.locus());
        }

        self.histogram.increment(n_patients);

        Ok(())
    }

    /// Consumes the builder and returns the finished [`Index`].
    pub fn build(self) -> Index {
        Index {
            patient_loci: self.patient_loci,
            locus_patients: self.locus_patients,
            histogram: self.histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(locus: &str, n_patients: &str, patients: &str) -> Record {
        Record::try_from_fields(locus, n_patients, patients).unwrap()
    }

    fn scenario_a() -> Vec<Record> {
        vec![
            record("L1", "2", "P1,P2"),
            record("L2", "1", "P1"),
            record("L3", "1", "P2"),
        ]
    }

    #[test]
    fn test_scenario_a_indices() -> Result<()> {
        let index = Index::try_from_records(scenario_a(), CountPolicy::Trust)?;

        assert_eq!(
            index.patient_loci()["P1"].iter().collect::<Vec<_>>(),
            vec!["L1", "L2"]
        );
        assert_eq!(
            index.patient_loci()["P2"].iter().collect::<Vec<_>>(),
            vec!["L1", "L3"]
        );
        assert_eq!(
            index.histogram().iter().collect::<Vec<_>>(),
            vec![(1, 2), (2, 1)]
        );
        assert_eq!(index.num_loci(), 3);
        assert_eq!(index.unique_loci(), 2);
        assert_eq!(index.shared_loci(), 1);
        assert_eq!(index.loci_per_patient(), Some(2.0));

        Ok(())
    }

    #[test]
    fn test_empty_patient_list() -> Result<()> {
        let records = vec![record("L1", "0", ""), record("L2", "1", "P1")];
        let index = Index::try_from_records(records, CountPolicy::Trust)?;

        assert_eq!(index.histogram().get(0), 1);
        assert_eq!(index.num_patients(), 1);
        assert!(!index.patient_loci()["P1"].contains("L1"));
        assert!(index.locus_patients()["L1"].is_empty());

        Ok(())
    }

    #[test]
    fn test_duplicate_locus_last_write_wins() -> Result<()> {
        let records = vec![record("L1", "1", "P1"), record("L1", "1", "P2")];
        let index = Index::try_from_records(records, CountPolicy::Trust)?;

        assert_eq!(
            index.locus_patients()["L1"].iter().collect::<Vec<_>>(),
            vec!["P2"]
        );
        assert_eq!(index.histogram().get(1), 2);
        assert_eq!(index.num_patients(), 2);

        Ok(())
    }

    #[test]
    fn test_count_policies() -> Result<()> {
        let records = || vec![record("L1", "5", "P1,P2,P2")];

        let index = Index::try_from_records(records(), CountPolicy::Trust)?;
        assert_eq!(index.histogram().get(5), 1);

        let index = Index::try_from_records(records(), CountPolicy::Recompute)?;
        assert_eq!(index.histogram().get(2), 1);
        assert_eq!(index.histogram().get(5), 0);

        let err = Index::try_from_records(records(), CountPolicy::Validate).unwrap_err();
        assert_eq!(
            err.to_string(),
            "incorrect patient count for locus L1: n_patients is 5, but 2 distinct patients are \
             listed"
        );

        Ok(())
    }

    #[test]
    fn test_no_patients() -> Result<()> {
        let index = Index::try_from_records(vec![record("L1", "0", "")], CountPolicy::Trust)?;

        assert_eq!(index.num_patients(), 0);
        assert_eq!(index.shared_loci(), 0);
        assert_eq!(index.unique_loci(), 0);
        assert_eq!(index.loci_per_patient(), None);

        Ok(())
    }
}
