//! A single heterogeneity analysis run over one cohort table.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::Histogram;
use crate::Reader;
use crate::diversity::Diversity;
use crate::index;
use crate::index::Builder;
use crate::index::CountPolicy;
use crate::index::Index;
use crate::reader;
use crate::similarity::Similarity;

/// The extension that marks a gzip-compressed input.
const GZIP_EXTENSION: &str = "gz";

/// An error related to analyzing the contents of a cohort table.
#[derive(Debug)]
pub enum Error {
    /// An error reading the table.
    Reader(reader::Error),

    /// An error building the indices.
    Index(index::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Reader(err) => write!(f, "reader error: {err}"),
            Error::Index(err) => write!(f, "index error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// An error related to analyzing a cohort table on disk.
#[derive(Debug)]
pub enum FileError {
    /// The file does not exist.
    NotFound(PathBuf),

    /// The file could not be opened.
    Io(PathBuf, io::Error),

    /// The contents of the file could not be analyzed.
    Analysis(PathBuf, Error),
}

impl FileError {
    /// Gets the path of the file that caused the error.
    pub fn path(&self) -> &Path {
        match self {
            FileError::NotFound(path) => path,
            FileError::Io(path, _) => path,
            FileError::Analysis(path, _) => path,
        }
    }

    /// Returns whether the error is due to a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FileError::NotFound(_))
    }
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::NotFound(path) => write!(f, "file not found: {}", path.display()),
            FileError::Io(path, err) => {
                write!(f, "i/o error opening {}: {err}", path.display())
            }
            FileError::Analysis(path, err) => write!(f, "{}: {err}", path.display()),
        }
    }
}

impl std::error::Error for FileError {}

/// The results of one analysis run.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    /// The indices built from the table.
    index: Index,

    /// The pairwise similarity between patients.
    similarity: Similarity,

    /// The diversity of the patients-per-locus histogram.
    diversity: Diversity,
}

impl Analysis {
    /// Computes every statistic for an [`Index`].
    pub fn new(index: Index) -> Self {
        let similarity = Similarity::compute(index.patient_loci());
        let diversity = Diversity::shannon(index.histogram());

        Self {
            index,
            similarity,
            diversity,
        }
    }

    /// Attempts to analyze a cohort table from a reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use heterogeneity::Analysis;
    /// use heterogeneity::index::CountPolicy;
    ///
    /// let data = b"locus,n_patients,patients\nL1,2,\"P1,P2\"\nL2,1,P1\nL3,1,P2\n";
    /// let analysis = Analysis::try_from_reader(&data[..], CountPolicy::Trust)?;
    ///
    /// assert_eq!(analysis.num_patients(), 2);
    /// assert_eq!(analysis.total_loci(), 3);
    /// assert!((analysis.similarity().summary().unwrap().mean() - 1.0 / 3.0).abs() < 1e-12);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_reader<T>(inner: T, policy: CountPolicy) -> Result<Self, Error>
    where
        T: Read,
    {
        let mut reader = Reader::new(inner).map_err(Error::Reader)?;
        let mut builder = Builder::new(policy);
        let mut records = 0usize;

        for result in reader.records() {
            let record = result.map_err(Error::Reader)?;
            builder.push(&record).map_err(Error::Index)?;
            records += 1;
        }

        let index = builder.build();
        debug!(
            "indexed {} records: {} patients, {} distinct loci",
            records,
            index.num_patients(),
            index.num_loci()
        );

        Ok(Self::new(index))
    }

    /// Attempts to analyze a cohort table on disk.
    ///
    /// Files ending in `.gz` are decompressed while reading.
    pub fn try_from_path(path: impl AsRef<Path>, policy: CountPolicy) -> Result<Self, FileError> {
        let path = path.as_ref();
        let inner = open(path)?;

        debug!("analyzing {}", path.display());
        Self::try_from_reader(inner, policy).map_err(|err| FileError::Analysis(path.into(), err))
    }

    /// Gets the indices.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Gets the pairwise similarity.
    pub fn similarity(&self) -> &Similarity {
        &self.similarity
    }

    /// Gets the diversity.
    pub fn diversity(&self) -> &Diversity {
        &self.diversity
    }

    /// Gets the patients-per-locus histogram.
    pub fn histogram(&self) -> &Histogram {
        self.index.histogram()
    }

    /// Gets the number of distinct patients.
    pub fn num_patients(&self) -> usize {
        self.index.num_patients()
    }

    /// Gets the number of distinct locus identifiers.
    pub fn distinct_loci(&self) -> usize {
        self.index.num_loci()
    }

    /// Gets the number of loci counted by the histogram.
    pub fn total_loci(&self) -> usize {
        self.index.histogram().total()
    }

    /// Gets the number of loci observed in exactly one patient.
    pub fn unique_loci(&self) -> usize {
        self.index.unique_loci()
    }

    /// Gets the number of loci observed in every patient.
    pub fn shared_loci(&self) -> usize {
        self.index.shared_loci()
    }

    /// Gets the mean number of loci per patient.
    pub fn loci_per_patient(&self) -> Option<f64> {
        self.index.loci_per_patient()
    }
}

/// Opens a file for reading, decompressing it if needed.
fn open(path: &Path) -> Result<Box<dyn Read>, FileError> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => FileError::NotFound(path.into()),
        _ => FileError::Io(path.into(), err),
    })?;

    let reader = BufReader::new(file);

    if path.extension().is_some_and(|ext| ext == GZIP_EXTENSION) {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}
