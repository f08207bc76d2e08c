//! A count of annotated and novel transcripts in a merged gene-model file.

use std::io::BufRead;

use tracing::debug;

use crate::gtf::Line;
use crate::gtf::Reader;
use crate::gtf::Record;
use crate::gtf::Strand;
use crate::gtf::line::COMMENT_PREFIX;
use crate::gtf::reader;
use crate::gtf::record;

/// The feature type counted by default.
pub const DEFAULT_FEATURE: &str = "transcript";

/// The attribute marking a transcript as matching a reference gene.
pub const REFERENCE_GENE_ATTRIBUTE: &str = "ref_gene_id";

/// The attribute holding the transcript identifier.
pub const TRANSCRIPT_ID_ATTRIBUTE: &str = "transcript_id";

/// The 0-based column holding the feature type.
const FEATURE_FIELD: usize = 2;

/// The maximum number of novel transcripts retained as examples.
pub const MAX_NOVEL_EXAMPLES: usize = 20;

/// A novel transcript retained as an example.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NovelTranscript {
    /// The reference sequence name.
    pub seqname: String,
    /// The start position.
    pub start: u64,
    /// The end position.
    pub end: u64,
    /// The strand.
    pub strand: Strand,
    /// The transcript identifier, if present.
    pub transcript_id: Option<String>,
}

impl std::fmt::Display for NovelTranscript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{} ({}) {}",
            self.seqname,
            self.start,
            self.end,
            self.strand,
            self.transcript_id.as_deref().unwrap_or("<None>")
        )
    }
}

/// Counts of annotated and novel transcripts.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    /// The number of records of the counted feature type.
    total: usize,
    /// The number of records with a reference gene.
    annotated: usize,
    /// The number of records without a reference gene.
    novel: usize,
    /// The first novel records, up to [`MAX_NOVEL_EXAMPLES`].
    examples: Vec<NovelTranscript>,
}

impl Summary {
    /// Summarizes the records of type `feature` from a reader.
    ///
    /// Only lines of type `feature` are parsed, so malformed lines of any
    /// other type are ignored. Lines with fewer than nine columns are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use heterogeneity::gtf::Reader;
    /// use heterogeneity::gtf::Summary;
    ///
    /// let data = b"chr1\tStringTie\ttranscript\t1\t10\t.\t+\t.\ttranscript_id \"T1\"; ref_gene_id \"G1\";\n\
    ///              chr1\tStringTie\ttranscript\t20\t30\t.\t-\t.\ttranscript_id \"T2\";\n\
    ///              chr1\tStringTie\texon\t20\t30\t.\t-\t.\ttranscript_id \"T2\";\n";
    /// let mut reader = Reader::new(&data[..]);
    /// let summary = Summary::try_from_reader(&mut reader, "transcript")?;
    ///
    /// assert_eq!(summary.total(), 2);
    /// assert_eq!(summary.annotated(), 1);
    /// assert_eq!(summary.novel(), 1);
    /// assert_eq!(summary.examples()[0].transcript_id.as_deref(), Some("T2"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_reader<T>(
        reader: &mut Reader<T>,
        feature: &str,
    ) -> Result<Self, reader::Error>
    where
        T: BufRead,
    {
        let mut summary = Self::default();
        let mut buffer = String::new();

        while reader.read_raw_line(&mut buffer)? {
            if buffer.is_empty() || buffer.starts_with(COMMENT_PREFIX) {
                continue;
            }

            let mut fields = buffer.split(record::FIELD_DELIMITER);
            let num_fields = fields.clone().count();

            if num_fields < record::NUM_FIELDS {
                debug!("skipping truncated line {}", reader.line_no());
                continue;
            }

            if fields.nth(FEATURE_FIELD) != Some(feature) {
                continue;
            }

            if let Line::Record(record) = reader.parse_line(&buffer)? {
                summary.push(&record);
            }
        }

        Ok(summary)
    }

    /// Counts a single record.
    fn push(&mut self, record: &Record) {
        self.total += 1;

        if record.attributes().contains_key(REFERENCE_GENE_ATTRIBUTE) {
            self.annotated += 1;
            return;
        }

        self.novel += 1;

        if self.examples.len() < MAX_NOVEL_EXAMPLES {
            self.examples.push(NovelTranscript {
                seqname: record.seqname().into(),
                start: record.start(),
                end: record.end(),
                strand: record.strand(),
                transcript_id: record
                    .attributes()
                    .get(TRANSCRIPT_ID_ATTRIBUTE)
                    .map(String::from),
            });
        }
    }

    /// Gets the number of records counted.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Gets the number of annotated records.
    pub fn annotated(&self) -> usize {
        self.annotated
    }

    /// Gets the number of novel records.
    pub fn novel(&self) -> usize {
        self.novel
    }

    /// Gets the retained novel records.
    pub fn examples(&self) -> &[NovelTranscript] {
        &self.examples
    }
}
