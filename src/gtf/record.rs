//! A gene-model record.

use std::num::ParseIntError;
use std::str::FromStr;

use crate::gtf::attributes;
use crate::gtf::attributes::Attributes;
use crate::gtf::strand;
use crate::gtf::strand::Strand;

/// The delimiter between the columns of a record.
pub const FIELD_DELIMITER: char = '\t';

/// The number of expected columns in a record.
pub const NUM_FIELDS: usize = 9;

/// An error associated with parsing a gene-model record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of columns.
    IncorrectNumberOfFields(usize),
    /// An invalid start position.
    InvalidStart(ParseIntError),
    /// An invalid end position.
    InvalidEnd(ParseIntError),
    /// The end position is before the start position.
    EndBeforeStart(u64, u64),
    /// An invalid strand.
    InvalidStrand(strand::ParseStrandError),
    /// An invalid attribute column.
    InvalidAttributes(attributes::ParseError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in record: expected {} fields, found {} fields",
                NUM_FIELDS, n
            ),
            ParseError::InvalidStart(err) => write!(f, "invalid start: {}", err),
            ParseError::InvalidEnd(err) => write!(f, "invalid end: {}", err),
            ParseError::EndBeforeStart(start, end) => write!(
                f,
                "the end position ({}) is before the start position ({})",
                end, start
            ),
            ParseError::InvalidStrand(err) => write!(f, "invalid strand: {}", err),
            ParseError::InvalidAttributes(err) => write!(f, "invalid attributes: {}", err),
        }
    }
}

impl std::error::Error for ParseError {}

/// A record within a gene-model file.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// The reference sequence name.
    seqname: String,
    /// The annotation source.
    source: String,
    /// The feature type.
    feature: String,
    /// The 1-based start position.
    start: u64,
    /// The 1-based, inclusive end position.
    end: u64,
    /// The score (`.` when absent).
    score: String,
    /// The strand.
    strand: Strand,
    /// The reading frame (`.` when absent).
    frame: String,
    /// The attributes.
    attributes: Attributes,
}

impl Record {
    /// Gets the reference sequence name.
    ///
    /// # Examples
    ///
    /// ```
    /// use heterogeneity::gtf::Record;
    ///
    /// let record = "chr1\tStringTie\ttranscript\t11\t20\t.\t+\t.\ttranscript_id \"T1\";"
    ///     .parse::<Record>()?;
    ///
    /// assert_eq!(record.seqname(), "chr1");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn seqname(&self) -> &str {
        &self.seqname
    }

    /// Gets the annotation source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Gets the feature type.
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Gets the start position.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Gets the end position.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Gets the score.
    pub fn score(&self) -> &str {
        &self.score
    }

    /// Gets the strand.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Gets the reading frame.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// Gets the attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split(FIELD_DELIMITER).collect::<Vec<_>>();
        if parts.len() != NUM_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(parts.len()));
        }

        let start = parts[3].parse().map_err(ParseError::InvalidStart)?;
        let end = parts[4].parse().map_err(ParseError::InvalidEnd)?;
        if end < start {
            return Err(ParseError::EndBeforeStart(start, end));
        }

        let strand = parts[6].parse().map_err(ParseError::InvalidStrand)?;
        let attributes = parts[8].parse().map_err(ParseError::InvalidAttributes)?;

        Ok(Record {
            seqname: parts[0].into(),
            source: parts[1].into(),
            feature: parts[2].into(),
            start,
            end,
            score: parts[5].into(),
            strand,
            frame: parts[7].into(),
            attributes,
        })
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start = self.start.to_string();
        let end = self.end.to_string();
        let strand = self.strand.to_string();
        let attributes = self.attributes.to_string();

        let parts = [
            self.seqname.as_str(),
            self.source.as_str(),
            self.feature.as_str(),
            start.as_str(),
            end.as_str(),
            self.score.as_str(),
            strand.as_str(),
            self.frame.as_str(),
            attributes.as_str(),
        ];

        write!(f, "{}", parts.join(FIELD_DELIMITER.to_string().as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSCRIPT: &str = "chr1\tStringTie\ttranscript\t11869\t14409\t1000\t+\t.\t\
                              gene_id \"MSTRG.1\"; transcript_id \"MSTRG.1.1\"; \
                              ref_gene_id \"ENSG00000223972\";";

    #[test]
    fn test_parsing_record() -> Result<(), Box<dyn std::error::Error>> {
        let record = TRANSCRIPT.parse::<Record>()?;

        assert_eq!(record.seqname(), "chr1");
        assert_eq!(record.source(), "StringTie");
        assert_eq!(record.feature(), "transcript");
        assert_eq!(record.start(), 11869);
        assert_eq!(record.end(), 14409);
        assert_eq!(record.score(), "1000");
        assert_eq!(record.strand(), Strand::Positive);
        assert_eq!(record.frame(), ".");
        assert_eq!(record.attributes().get("transcript_id"), Some("MSTRG.1.1"));

        Ok(())
    }

    #[test]
    fn test_record_display() -> Result<(), Box<dyn std::error::Error>> {
        let record = TRANSCRIPT.parse::<Record>()?;
        assert_eq!(record.to_string(), TRANSCRIPT);
        Ok(())
    }

    #[test]
    fn test_invalid_number_of_fields() {
        let err = "chr1\tStringTie\ttranscript\t1\t2"
            .parse::<Record>()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid number of fields in record: expected 9 fields, found 5 fields"
        );
    }

    #[test]
    fn test_invalid_start() {
        let err = "chr1\tsrc\texon\t?\t2\t.\t+\t.\tgene_id \"G1\";"
            .parse::<Record>()
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid start: invalid digit found in string");
    }

    #[test]
    fn test_end_before_start() {
        let err = "chr1\tsrc\texon\t10\t2\t.\t+\t.\tgene_id \"G1\";"
            .parse::<Record>()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "the end position (2) is before the start position (10)"
        );
    }

    #[test]
    fn test_invalid_strand() {
        let err = "chr1\tsrc\texon\t1\t2\t.\t*\t.\tgene_id \"G1\";"
            .parse::<Record>()
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid strand: * is not a valid strand");
    }
}
