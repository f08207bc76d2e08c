//! A gene-model file reader.

use std::io;
use std::io::BufRead;
use std::iter;

use crate::gtf::Line;
use crate::gtf::line;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A line error, with the 1-based line number.
    Line(line::ParseError, usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Line(err, line_no) => write!(f, "line {line_no}: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A gene-model file reader.
#[derive(Clone, Debug)]
pub struct Reader<T>
where
    T: BufRead,
{
    /// The inner reader.
    inner: T,

    /// The number of lines read so far.
    line_no: usize,
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a gene-model file reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chr1\tsrc\ttranscript\t1\t10\t.\t+\t.\ttranscript_id \"T1\";\n";
    /// let reader = heterogeneity::gtf::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self { inner, line_no: 0 }
    }

    /// Gets the number of lines read so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Attempts to read a [`Line`] from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use heterogeneity::gtf::Line;
    ///
    /// let data = b"#comment\nchr1\tsrc\ttranscript\t1\t10\t.\t+\t.\ttranscript_id \"T1\";\n";
    /// let mut reader = heterogeneity::gtf::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::Comment(_))));
    /// assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::Record(_))));
    /// assert!(reader.read_line(&mut buffer)?.is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_line(&mut self, buffer: &mut String) -> Result<Option<Line>, Error> {
        if !self.read_raw_line(buffer)? {
            return Ok(None);
        }

        self.parse_line(buffer).map(Some)
    }

    /// Attempts to read a line from the underlying reader without parsing it.
    ///
    /// The line ending is stripped. Returns `false` at the end of the input.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chr1\tsrc\texon\t1\t10\t.\t?\t.\tbasic\n";
    /// let mut reader = heterogeneity::gtf::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// assert!(reader.read_raw_line(&mut buffer)?);
    /// assert!(buffer.ends_with("basic"));
    /// assert!(!reader.read_raw_line(&mut buffer)?);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_raw_line(&mut self, buffer: &mut String) -> Result<bool, Error> {
        match read_line(&mut self.inner, buffer).map_err(Error::Io)? {
            0 => Ok(false),
            _ => {
                self.line_no += 1;
                Ok(true)
            }
        }
    }

    /// Parses the most recently read raw line into a [`Line`].
    pub fn parse_line(&self, buffer: &str) -> Result<Line, Error> {
        buffer
            .parse::<Line>()
            .map_err(|err| Error::Line(err, self.line_no))
    }

    /// Returns an iterator over the [`Line`]s in the underlying reader.
    pub fn lines(&mut self) -> impl Iterator<Item = Result<Line, Error>> + '_ {
        let mut buffer = String::new();
        iter::from_fn(move || self.read_line(&mut buffer).transpose())
    }
}

/// Reads a line from a buffered reader, stripping the line ending.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_read_line() {
        let data = b"hello\r\nworld!";
        let mut cursor = io::Cursor::new(data);

        let mut buffer = String::new();
        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "hello");
        assert_eq!(len, 7);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "world!");
        assert_eq!(len, 6);
    }

    #[test]
    fn test_error_has_line_number() {
        let data = b"#header\n\nchr1\tsrc\n";
        let mut reader = Reader::new(&data[..]);

        let results = reader.lines().collect::<Vec<_>>();
        assert_eq!(results.len(), 3);

        let err = results.into_iter().last().unwrap().unwrap_err();
        assert!(err.to_string().starts_with("line 3: invalid record"));
    }
}
