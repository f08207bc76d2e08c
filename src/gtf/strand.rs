//! The strand of a gene-model record.

use std::str::FromStr;

/// An error related to the parsing of a strand.
#[derive(Debug)]
pub struct ParseStrandError(String);

impl std::fmt::Display for ParseStrandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not a valid strand", self.0)
    }
}

impl std::error::Error for ParseStrandError {}

/// The strand of a gene-model record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strand {
    /// The positive strand (`+`).
    Positive,
    /// The negative strand (`-`).
    Negative,
    /// An unstranded feature (`.`).
    Unknown,
}

impl FromStr for Strand {
    type Err = ParseStrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Positive),
            "-" => Ok(Self::Negative),
            "." => Ok(Self::Unknown),
            c => Err(ParseStrandError(c.into())),
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strand::Positive => write!(f, "+"),
            Strand::Negative => write!(f, "-"),
            Strand::Unknown => write!(f, "."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strand_from_str() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("+".parse::<Strand>()?, Strand::Positive);
        assert_eq!("-".parse::<Strand>()?, Strand::Negative);
        assert_eq!(".".parse::<Strand>()?, Strand::Unknown);

        let err = "?".parse::<Strand>().unwrap_err();
        assert_eq!(err.to_string(), "? is not a valid strand");

        Ok(())
    }
}
