//! The attribute column of a gene-model record.
//!
//! The column is a `;`-separated list of tokens. Each token is either
//! `key "value"` (GTF) or `key=value` (GFF). Surrounding whitespace and
//! double quotes are stripped from values and empty tokens are skipped.

use std::str::FromStr;

/// The delimiter between attribute tokens.
pub const ATTRIBUTE_DELIMITER: char = ';';

/// An error associated with parsing attributes.
#[derive(Debug)]
pub enum ParseError {
    /// A token has an empty key.
    EmptyKey(String),
    /// A token has a key but no value.
    MissingValue(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyKey(token) => write!(f, "empty attribute key: \"{token}\""),
            ParseError::MissingValue(token) => {
                write!(f, "missing attribute value: \"{token}\"")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// The attributes of a gene-model record, in source order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Gets the value for `key`.
    ///
    /// If a key occurs more than once, the first value is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use heterogeneity::gtf::Attributes;
    ///
    /// let attributes = r#"gene_id "G1"; transcript_id "T1"; tag "a"; tag "b";"#
    ///     .parse::<Attributes>()?;
    ///
    /// assert_eq!(attributes.get("transcript_id"), Some("T1"));
    /// assert_eq!(attributes.get("tag"), Some("a"));
    /// assert_eq!(attributes.get("ref_gene_id"), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns whether an attribute named `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Gets the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parses a single non-empty token.
fn parse_token(token: &str) -> Result<(String, String), ParseError> {
    let (key, rest) = match token.find(|c: char| c.is_whitespace() || c == '=') {
        Some(i) => token.split_at(i),
        None => return Err(ParseError::MissingValue(token.into())),
    };

    if key.is_empty() {
        return Err(ParseError::EmptyKey(token.into()));
    }

    let rest = rest.trim_start();
    let value = rest.strip_prefix('=').unwrap_or(rest);
    let value = value.trim().trim_matches('"');

    Ok((key.into(), value.into()))
}

impl FromStr for Attributes {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(ATTRIBUTE_DELIMITER)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(parse_token)
            .collect::<Result<Vec<_>, _>>()
            .map(Attributes)
    }
}

impl std::fmt::Display for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;

        for (key, value) in self.iter() {
            if !first {
                write!(f, " ")?;
            }

            write!(f, "{key} \"{value}\";")?;
            first = false;
        }

        Ok(())
    }
}
