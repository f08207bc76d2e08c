//! A locus record.

use std::collections::BTreeSet;
use std::num::ParseIntError;

/// The delimiter between patient identifiers within the `patients` field.
pub const PATIENT_DELIMITER: char = ',';

/// An error associated with parsing a locus record.
#[derive(Debug)]
pub enum ParseError {
    /// The locus identifier was empty.
    EmptyLocus,
    /// An invalid patient count.
    InvalidPatientCount(String, ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyLocus => write!(f, "empty locus identifier"),
            ParseError::InvalidPatientCount(value, err) => {
                write!(f, "invalid patient count \"{value}\": {err}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A single row of a cohort table: a locus and the patients it was observed
/// in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The locus identifier.
    locus: String,
    /// The stored patient count.
    n_patients: usize,
    /// The patient identifiers, in the order they appear in the source.
    patients: Vec<String>,
}

impl Record {
    /// Creates a new [`Record`].
    ///
    /// # Examples
    ///
    /// ```
    /// use heterogeneity::record::Record;
    ///
    /// let record = Record::new("L1", 2, vec![String::from("P1"), String::from("P2")]);
    /// assert_eq!(record.locus(), "L1");
    /// assert_eq!(record.n_patients(), 2);
    /// ```
    pub fn new(locus: impl Into<String>, n_patients: usize, patients: Vec<String>) -> Self {
        Self {
            locus: locus.into(),
            n_patients,
            patients,
        }
    }

    /// Attempts to create a [`Record`] from the raw textual fields of a row.
    ///
    /// # Examples
    ///
    /// ```
    /// use heterogeneity::record::Record;
    ///
    /// let record = Record::try_from_fields("L1", "2", "P1, P2")?;
    /// assert_eq!(record.patients(), &["P1", "P2"]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_fields(
        locus: &str,
        n_patients: &str,
        patients: &str,
    ) -> Result<Self, ParseError> {
        let locus = locus.trim();
        if locus.is_empty() {
            return Err(ParseError::EmptyLocus);
        }

        let n_patients = n_patients.trim();
        let n_patients = n_patients
            .parse()
            .map_err(|err| ParseError::InvalidPatientCount(n_patients.into(), err))?;

        Ok(Self::new(locus, n_patients, parse_patients(patients)))
    }

    /// Gets the locus identifier.
    pub fn locus(&self) -> &str {
        &self.locus
    }

    /// Gets the patient count as stored in the source row.
    ///
    /// This value is not checked against [`Record::patients()`].
    pub fn n_patients(&self) -> usize {
        self.n_patients
    }

    /// Gets the patient identifiers.
    pub fn patients(&self) -> &[String] {
        &self.patients
    }

    /// Gets the distinct patient identifiers.
    ///
    /// # Examples
    ///
    /// ```
    /// use heterogeneity::record::Record;
    ///
    /// let record = Record::try_from_fields("L1", "3", "P2,P1,P2")?;
    /// assert_eq!(record.distinct_patients().into_iter().collect::<Vec<_>>(), ["P1", "P2"]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn distinct_patients(&self) -> BTreeSet<&str> {
        self.patients.iter().map(String::as_str).collect()
    }
}

/// Splits a `patients` field into its identifiers.
///
/// Entries are trimmed and empty entries are dropped, so a blank field yields
/// no patients at all.
pub fn parse_patients(s: &str) -> Vec<String> {
    s.split(PATIENT_DELIMITER)
        .map(str::trim)
        .filter(|patient| !patient.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsing_record() -> Result<(), Box<dyn std::error::Error>> {
        let record = Record::try_from_fields(" L1 ", " 2", "P1 , P2")?;

        assert_eq!(record.locus(), "L1");
        assert_eq!(record.n_patients(), 2);
        assert_eq!(record.patients(), &["P1", "P2"]);

        Ok(())
    }

    #[test]
    fn test_empty_patients_field() -> Result<(), Box<dyn std::error::Error>> {
        let record = Record::try_from_fields("L1", "0", "   ")?;
        assert!(record.patients().is_empty());
        assert!(record.distinct_patients().is_empty());

        assert!(parse_patients("").is_empty());
        assert_eq!(parse_patients("P1,,P2,"), vec!["P1", "P2"]);

        Ok(())
    }

    #[test]
    fn test_invalid_patient_count() {
        let err = Record::try_from_fields("L1", "two", "P1,P2").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid patient count \"two\": invalid digit found in string"
        );

        let err = Record::try_from_fields("L1", "-1", "P1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid patient count \"-1\": invalid digit found in string"
        );
    }

    #[test]
    fn test_empty_locus() {
        let err = Record::try_from_fields(" ", "1", "P1").unwrap_err();
        assert_eq!(err.to_string(), "empty locus identifier");
    }
}
