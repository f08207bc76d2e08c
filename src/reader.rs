//! A cohort table reader.

use std::io::Read;

use crate::record;
use crate::record::Record;

/// The name of the column holding locus identifiers.
pub const LOCUS_COLUMN: &str = "locus";

/// The name of the column holding the stored patient count.
pub const N_PATIENTS_COLUMN: &str = "n_patients";

/// The name of the column holding the patient list.
pub const PATIENTS_COLUMN: &str = "patients";

/// The delimiter between fields of a row.
pub const FIELD_DELIMITER: u8 = b',';

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An error from the underlying delimited-text parser.
    Csv(csv::Error),

    /// A required column is absent from the header.
    MissingColumn(&'static str),

    /// A row has no value for a required column.
    MissingField(&'static str, u64),

    /// A row has more fields than the header.
    TooManyFields(usize, usize, u64),

    /// A row could not be parsed into a record.
    InvalidRecord(record::ParseError, u64),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Csv(err) => write!(f, "{err}"),
            Error::MissingColumn(column) => {
                write!(f, "malformed input: missing required column \"{column}\"")
            }
            Error::MissingField(column, line_no) => {
                write!(f, "missing value for column \"{column}\": line {line_no}")
            }
            Error::TooManyFields(expected, found, line_no) => write!(
                f,
                "invalid number of fields: expected {expected} fields, found {found} fields \
                 (a \"{PATIENTS_COLUMN}\" list containing \"{}\" must be quoted): line {line_no}",
                record::PATIENT_DELIMITER
            ),
            Error::InvalidRecord(err, line_no) => {
                write!(f, "invalid record: {err}: line {line_no}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// The positions of the required columns within a row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Columns {
    /// The locus column.
    locus: usize,
    /// The patient count column.
    n_patients: usize,
    /// The patient list column.
    patients: usize,
    /// The number of columns in the header.
    len: usize,
}

impl Columns {
    /// Locates the required columns within a header row.
    ///
    /// Any additional columns are ignored.
    fn try_from_header(header: &csv::StringRecord) -> Result<Self> {
        let position = |name: &'static str| {
            header
                .iter()
                .position(|column| column == name)
                .ok_or(Error::MissingColumn(name))
        };

        Ok(Self {
            locus: position(LOCUS_COLUMN)?,
            n_patients: position(N_PATIENTS_COLUMN)?,
            patients: position(PATIENTS_COLUMN)?,
            len: header.len(),
        })
    }

    /// Converts a raw row into a [`Record`].
    ///
    /// Rows shorter than the header are accepted as long as every required
    /// column is present.
    fn record(&self, row: &csv::StringRecord) -> Result<Record> {
        let line_no = row.position().map(|position| position.line()).unwrap_or_default();

        if row.len() > self.len {
            return Err(Error::TooManyFields(self.len, row.len(), line_no));
        }

        let field = |index: usize, name: &'static str| {
            row.get(index).ok_or(Error::MissingField(name, line_no))
        };

        Record::try_from_fields(
            field(self.locus, LOCUS_COLUMN)?,
            field(self.n_patients, N_PATIENTS_COLUMN)?,
            field(self.patients, PATIENTS_COLUMN)?,
        )
        .map_err(|err| Error::InvalidRecord(err, line_no))
    }
}

/// A cohort table reader.
///
/// The header row is read and checked when the reader is created.
#[derive(Debug)]
pub struct Reader<T>
where
    T: Read,
{
    /// The inner delimited-text reader.
    inner: csv::Reader<T>,

    /// The required column positions.
    columns: Columns,
}

impl<T> Reader<T>
where
    T: Read,
{
    /// Attempts to create a cohort table reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"locus,n_patients,patients\nL1,2,\"P1,P2\"\n";
    /// let reader = heterogeneity::Reader::new(&data[..])?;
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(inner: T) -> Result<Self> {
        let mut inner = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(FIELD_DELIMITER)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(inner);

        let columns = Columns::try_from_header(inner.headers().map_err(Error::Csv)?)?;

        Ok(Self { inner, columns })
    }

    /// Returns an iterator over the [`Record`]s in the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"locus,n_patients,patients\nL1,2,\"P1,P2\"\nL2,1,P1\n";
    /// let mut reader = heterogeneity::Reader::new(&data[..])?;
    ///
    /// let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(records.len(), 2);
    /// assert_eq!(records[0].patients(), &["P1", "P2"]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn records(&mut self) -> impl Iterator<Item = Result<Record>> + '_ {
        let columns = self.columns;

        self.inner.records().map(move |result| {
            let row = result.map_err(Error::Csv)?;
            columns.record(&row)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_columns_are_ignored() -> Result<()> {
        let data = b"chrom,patients,locus,n_patients\nchr1,\"P1, P2\",L1,2\n";
        let mut reader = Reader::new(&data[..])?;

        let records = reader.records().collect::<Result<Vec<_>>>()?;
        assert_eq!(
            records,
            vec![Record::new(
                "L1",
                2,
                vec![String::from("P1"), String::from("P2")]
            )]
        );

        Ok(())
    }

    #[test]
    fn test_missing_column() {
        let data = b"locus,patients\nL1,P1\n";
        let err = Reader::new(&data[..]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed input: missing required column \"n_patients\""
        );
    }

    #[test]
    fn test_empty_input_is_missing_columns() {
        let err = Reader::new(&b""[..]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed input: missing required column \"locus\""
        );
    }

    #[test]
    fn test_invalid_record_names_line() -> Result<()> {
        let data = b"locus,n_patients,patients\nL1,1,P1\nL2,x,P2\n";
        let mut reader = Reader::new(&data[..])?;

        let mut records = reader.records();
        assert!(records.next().unwrap().is_ok());

        let err = records.next().unwrap().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid record: invalid patient count \"x\": invalid digit found in string: line 3"
        );

        Ok(())
    }

    #[test]
    fn test_short_row_names_missing_column() -> Result<()> {
        let data = b"locus,n_patients,patients\nL1,1,P1\nL2,1\n";
        let mut reader = Reader::new(&data[..])?;

        let mut records = reader.records();
        assert!(records.next().unwrap().is_ok());

        let err = records.next().unwrap().unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing value for column \"patients\": line 3"
        );

        Ok(())
    }

    #[test]
    fn test_short_row_with_optional_columns() -> Result<()> {
        let data = b"locus,n_patients,patients,chrom\nL1,1,P1\n";
        let mut reader = Reader::new(&data[..])?;

        let records = reader.records().collect::<Result<Vec<_>>>()?;
        assert_eq!(records, vec![Record::new("L1", 1, vec![String::from("P1")])]);

        Ok(())
    }

    #[test]
    fn test_unquoted_patient_list() -> Result<()> {
        let data = b"locus,n_patients,patients\nL1,2,P1,P2\n";
        let mut reader = Reader::new(&data[..])?;

        let err = reader.records().next().unwrap().unwrap_err();
        assert!(matches!(err, Error::TooManyFields(3, 4, 2)));
        assert_eq!(
            err.to_string(),
            "invalid number of fields: expected 3 fields, found 4 fields (a \"patients\" list \
             containing \",\" must be quoted): line 2"
        );

        Ok(())
    }

    #[test]
    fn test_csv_error_is_not_prefixed_twice() -> Result<()> {
        let data = b"locus,n_patients,patients\nL1,1,\xff\n";
        let mut reader = Reader::new(&data[..])?;

        let err = reader.records().next().unwrap().unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
        assert!(!err.to_string().starts_with("csv error"));

        Ok(())
    }

    #[test]
    fn test_header_only() -> Result<()> {
        let data = b"locus,n_patients,patients\n";
        let mut reader = Reader::new(&data[..])?;
        assert_eq!(reader.records().count(), 0);
        Ok(())
    }
}
