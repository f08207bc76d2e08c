//! Rendering of analysis results.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use tabled::builder::Builder;
use tabled::settings::Alignment;
use tabled::settings::Style;
use tabled::settings::object::Rows;

use crate::Analysis;
use crate::Histogram;
use crate::diversity::Diversity;
use crate::similarity::Similarity;

/// The suffix of a persisted report's file name.
pub const REPORT_SUFFIX: &str = "_heterogeneity.txt";

/// The width of the section rules.
const RULE_WIDTH: usize = 70;

/// Matches the table extension at the end of an input file name.
static TABLE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.csv(\.gz)?$").unwrap());

/// Derives the name of the persisted report for an input file.
///
/// A trailing `.csv` (or `.csv.gz`) is replaced by [`REPORT_SUFFIX`]; any
/// other name has the suffix appended. When `directory` is given the report
/// is placed there, otherwise next to the input.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use std::path::PathBuf;
///
/// use heterogeneity::report::output_path;
///
/// assert_eq!(
///     output_path(Path::new("data/cohort.csv"), None),
///     PathBuf::from("data/cohort_heterogeneity.txt")
/// );
/// assert_eq!(
///     output_path(Path::new("data/cohort.csv.gz"), Some(Path::new("out"))),
///     PathBuf::from("out/cohort_heterogeneity.txt")
/// );
/// ```
pub fn output_path(input: &Path, directory: Option<&Path>) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let name = format!("{}{}", TABLE_EXTENSION.replace(&name, ""), REPORT_SUFFIX);

    match directory {
        Some(directory) => directory.join(name),
        None => input.with_file_name(name),
    }
}

/// Formats a percentage, or `n/a` when there is no denominator.
fn percentage(value: Option<f64>) -> String {
    value
        .map(|value| format!("{value:.2}%"))
        .unwrap_or_else(|| String::from("n/a"))
}

/// Renders the frequency distribution table, including the totals row.
///
/// # Examples
///
/// ```
/// use heterogeneity::Histogram;
/// use heterogeneity::report::frequency_table;
///
/// let histogram = [1, 1, 2].into_iter().collect::<Histogram>();
/// let table = frequency_table(&histogram);
///
/// assert!(table.contains("66.67%"));
/// assert!(table.contains("TOTAL"));
/// ```
pub fn frequency_table(histogram: &Histogram) -> String {
    let total = histogram.total();

    let mut builder = Builder::default();
    builder.push_record(["Patients", "Loci", "Percentage"]);

    for (n_patients, count) in histogram.iter() {
        builder.push_record([
            n_patients.to_string(),
            count.to_string(),
            percentage(histogram.percentage(count)),
        ]);
    }

    builder.push_record([
        String::from("TOTAL"),
        total.to_string(),
        percentage(histogram.percentage(total)),
    ]);

    builder
        .build()
        .with(Style::rounded())
        .modify(Rows::new(1..), Alignment::left())
        .to_string()
}

/// A rendered report for one [`Analysis`].
#[derive(Debug)]
pub struct Report<'a> {
    /// The name of the analyzed table.
    source: String,

    /// The analysis.
    analysis: &'a Analysis,
}

impl<'a> Report<'a> {
    /// Creates a new [`Report`].
    pub fn new(source: impl Into<String>, analysis: &'a Analysis) -> Self {
        Self {
            source: source.into(),
            analysis,
        }
    }

    /// Writes the report to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        std::fs::write(path, self.to_string())
    }
}

/// Writes a section heading.
fn heading(f: &mut std::fmt::Formatter<'_>, title: &str) -> std::fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))
}

impl std::fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let analysis = self.analysis;
        let histogram = analysis.histogram();

        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "TRANSCRIPTOMIC HETEROGENEITY ANALYSIS")?;
        writeln!(f, "File: {}", self.source)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f)?;

        heading(f, "JACCARD INDEX")?;
        writeln!(f, "Patients: {}", analysis.num_patients())?;
        match analysis.similarity() {
            Similarity::NotComputed { .. } => {
                writeln!(f, "Jaccard: not computed (fewer than 2 patients)")?;
            }
            Similarity::Computed(summary) => {
                writeln!(f, "Pairs compared: {}", summary.pairs())?;
                writeln!(f, "Mean Jaccard: {:.4}", summary.mean())?;
                writeln!(f, "Minimum Jaccard: {:.4}", summary.min())?;
                writeln!(f, "Maximum Jaccard: {:.4}", summary.max())?;
            }
        }
        writeln!(f)?;

        heading(f, "SHANNON DIVERSITY INDEX")?;
        match analysis.diversity() {
            Diversity::Trivial => writeln!(f, "Shannon: 0.0000 (trivial: no loci)")?,
            Diversity::Entropy(entropy) => writeln!(f, "Shannon: {entropy:.4}")?,
        }
        writeln!(f)?;

        heading(f, "FREQUENCY DISTRIBUTION")?;
        writeln!(f, "{}", frequency_table(histogram))?;
        writeln!(f)?;

        heading(f, "ADDITIONAL STATISTICS")?;
        writeln!(f, "Distinct loci: {}", analysis.distinct_loci())?;
        writeln!(f, "Patients: {}", analysis.num_patients())?;
        match analysis.loci_per_patient() {
            Some(mean) => writeln!(f, "Loci per patient (mean): {mean:.2}")?,
            None => writeln!(f, "Loci per patient (mean): not computed (no patients)")?,
        }
        writeln!(
            f,
            "Loci unique to one patient: {} ({})",
            analysis.unique_loci(),
            percentage(histogram.percentage(analysis.unique_loci()))
        )?;
        writeln!(
            f,
            "Loci shared by all patients: {} ({})",
            analysis.shared_loci(),
            percentage(histogram.percentage(analysis.shared_loci()))
        )
    }
}
