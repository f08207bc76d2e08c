//! A line within a gene-model file.

use std::str::FromStr;

use crate::gtf::record;
use crate::gtf::record::Record;

/// The prefix for a comment line.
pub const COMMENT_PREFIX: char = '#';

/// An error associated with parsing a line.
#[derive(Debug)]
pub struct ParseError(record::ParseError, String);

impl ParseError {
    /// Gets the underlying record error.
    pub fn inner(&self) -> &record::ParseError {
        &self.0
    }

    /// Gets the offending line.
    pub fn line(&self) -> &str {
        &self.1
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid record: {}\n\nline: {}", self.0, self.1)
    }
}

impl std::error::Error for ParseError {}

/// A line within a gene-model file.
#[derive(Clone, Debug, PartialEq)]
pub enum Line {
    /// An empty line.
    Empty,
    /// A comment or directive line (without the leading `#`).
    Comment(String),
    /// A record line.
    Record(Record),
}

impl FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            Ok(Self::Empty)
        } else if let Some(comment) = s.strip_prefix(COMMENT_PREFIX) {
            Ok(Self::Comment(comment.into()))
        } else {
            s.parse::<Record>()
                .map(Line::Record)
                .map_err(|e| ParseError(e, s.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("".parse::<Line>()?, Line::Empty);
        assert_eq!(
            "##gff-version 2".parse::<Line>()?,
            Line::Comment(String::from("#gff-version 2"))
        );
        assert!(matches!(
            "chr1\tsrc\texon\t1\t2\t.\t+\t.\tgene_id \"G1\";".parse::<Line>()?,
            Line::Record(_)
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_line() {
        let err = "chr1\tsrc".parse::<Line>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid record: invalid number of fields in record: expected 9 fields, found 2 \
             fields\n\nline: chr1\tsrc"
        );
        assert!(matches!(
            err.inner(),
            record::ParseError::IncorrectNumberOfFields(2)
        ));
    }
}
