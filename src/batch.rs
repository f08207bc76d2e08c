//! Analysis of several cohort tables in one run.

use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tracing::error;
use tracing::info;

use crate::Analysis;
use crate::analysis::FileError;
use crate::index::CountPolicy;
use crate::report;
use crate::report::Report;

/// The extension tried for a path given without one.
pub const TABLE_EXTENSION: &str = "csv";

/// An error related to a [`Batch`].
#[derive(Debug)]
pub enum Error {
    /// The output directory could not be created.
    OutputDirectory(PathBuf, io::Error),

    /// A table could not be analyzed.
    File(FileError),

    /// A report could not be saved.
    Save(PathBuf, io::Error),

    /// A report could not be written to the output stream.
    Write(io::Error),
}

impl Error {
    /// Returns whether the error is due to a missing table.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::File(err) if err.is_not_found())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::OutputDirectory(path, err) => {
                write!(f, "creating output directory {}: {err}", path.display())
            }
            Error::File(err) => write!(f, "{err}"),
            Error::Save(path, err) => write!(f, "writing report to {}: {err}", path.display()),
            Error::Write(err) => write!(f, "writing report: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// Resolves a path given by a user to the table to read.
///
/// If the path does not exist and has no extension, `.csv` is appended.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use heterogeneity::batch::resolve;
///
/// assert_eq!(resolve(Path::new("missing-cohort")), Path::new("missing-cohort.csv"));
/// assert_eq!(resolve(Path::new("cohort.tsv")), Path::new("cohort.tsv"));
/// ```
pub fn resolve(path: &Path) -> PathBuf {
    if !path.exists() && path.extension().is_none() {
        return path.with_extension(TABLE_EXTENSION);
    }

    path.to_path_buf()
}

/// The outcome of a [`Batch`] run.
#[derive(Debug, Default)]
pub struct Outcome {
    /// The tables that were analyzed.
    analyzed: Vec<PathBuf>,
    /// The reports that were saved.
    saved: Vec<PathBuf>,
    /// The tables that failed, with their errors.
    failed: Vec<(PathBuf, Error)>,
}

impl Outcome {
    /// Gets the tables that were analyzed (after resolution).
    pub fn analyzed(&self) -> &[PathBuf] {
        &self.analyzed
    }

    /// Gets the reports that were saved.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }

    /// Gets the tables that failed and their errors.
    pub fn failed(&self) -> &[(PathBuf, Error)] {
        &self.failed
    }

    /// Returns whether every table was analyzed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A batch of cohort tables analyzed with the same settings.
///
/// A table that fails is logged and skipped, and the remaining tables are
/// still analyzed.
#[derive(Clone, Debug, Default)]
pub struct Batch {
    /// How to treat the stored patient count.
    policy: CountPolicy,

    /// Whether to save a report next to each table.
    save: bool,

    /// The directory to save reports in instead of next to each table.
    output_directory: Option<PathBuf>,
}

impl Batch {
    /// Creates a new [`Batch`] that prints reports without saving them.
    pub fn new(policy: CountPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Sets whether a report is saved for each table.
    pub fn save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    /// Sets the directory reports are saved in.
    ///
    /// The directory is only created when reports are saved.
    pub fn output_directory(mut self, directory: Option<PathBuf>) -> Self {
        self.output_directory = directory;
        self
    }

    /// Analyzes a single table and writes its report to `out`.
    ///
    /// Returns the path of the saved report, if any.
    pub fn analyze<W>(&self, path: &Path, out: &mut W) -> Result<Option<PathBuf>, Error>
    where
        W: Write,
    {
        let analysis = Analysis::try_from_path(path, self.policy).map_err(Error::File)?;

        match analysis.similarity().summary() {
            Some(summary) => info!(
                "{}: {} patients, {} pairs, mean Jaccard {:.4}",
                path.display(),
                analysis.num_patients(),
                summary.pairs(),
                summary.mean()
            ),
            None => info!(
                "{}: {} patients, Jaccard not computed",
                path.display(),
                analysis.num_patients()
            ),
        }

        let rendered = Report::new(path.display().to_string(), &analysis);
        writeln!(out, "{rendered}").map_err(Error::Write)?;

        if !self.save {
            return Ok(None);
        }

        let output = report::output_path(path, self.output_directory.as_deref());
        rendered
            .save(&output)
            .map_err(|err| Error::Save(output.clone(), err))?;
        info!("results saved to {}", output.display());

        Ok(Some(output))
    }

    /// Analyzes every table in turn, writing each report to `out`.
    ///
    /// Only a failure to create the output directory stops the run. Every
    /// other failure is logged and recorded in the [`Outcome`].
    pub fn run<W>(&self, paths: &[PathBuf], out: &mut W) -> Result<Outcome, Error>
    where
        W: Write,
    {
        if let (true, Some(directory)) = (self.save, &self.output_directory) {
            std::fs::create_dir_all(directory)
                .map_err(|err| Error::OutputDirectory(directory.clone(), err))?;
        }

        let mut outcome = Outcome::default();

        for path in paths {
            let path = resolve(path);

            match self.analyze(&path, out) {
                Ok(saved) => {
                    outcome.analyzed.push(path);
                    outcome.saved.extend(saved);
                }
                Err(err) => {
                    if err.is_not_found() {
                        error!("{err}");
                    } else {
                        error!("analysis failed: {err}");
                    }

                    outcome.failed.push((path, err));
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_resolve_appends_extension() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("heterogeneity")?;
        std::fs::write(dir.path().join("cohort.csv"), "locus,n_patients,patients\n")?;
        std::fs::write(dir.path().join("README"), "")?;

        assert_eq!(resolve(&dir.path().join("cohort")), dir.path().join("cohort.csv"));
        assert_eq!(resolve(&dir.path().join("README")), dir.path().join("README"));
        assert_eq!(
            resolve(&dir.path().join("cohort.tsv")),
            dir.path().join("cohort.tsv")
        );

        Ok(())
    }

    #[test]
    fn test_error_messages() {
        let err = Error::File(FileError::NotFound(PathBuf::from("missing.csv")));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "file not found: missing.csv");

        let err = Error::Save(
            PathBuf::from("out/cohort_heterogeneity.txt"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "writing report to out/cohort_heterogeneity.txt: denied"
        );
    }
}
