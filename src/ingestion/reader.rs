use super::types::{SourceRow, DEFAULT_ENCODING};
use crate::catalog::CatalogError;
use encoding_rs::Encoding;
use std::io::BufRead;

const QUOTE: char = '"';

/// Streams records out of a delimited text source.
///
/// Quoting follows the usual spreadsheet-export rules: a field that starts with `"` runs
/// until the matching closing quote, may contain the delimiter and line breaks, and
/// writes a literal quote as `""`. A quote anywhere else is ordinary text. Blank lines
/// are skipped. Each line is decoded with the configured encoding (UTF-8 by default) and a
/// line that does not decode is reported as malformed rather than patched.
pub struct DelimitedReader<R> {
    inner: R,
    delimiter: char,
    encoding: &'static Encoding,
    line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> DelimitedReader<R> {
    pub fn new(inner: R, delimiter: char) -> Self {
        Self {
            inner,
            delimiter,
            encoding: DEFAULT_ENCODING,
            line: 0,
            buf: Vec::new(),
        }
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Number of physical lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }

    fn read_line(&mut self) -> Result<Option<String>, CatalogError> {
        self.buf.clear();
        if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;

        let mut text = self
            .encoding
            .decode_without_bom_handling_and_without_replacement(&self.buf)
            .ok_or_else(|| {
                CatalogError::malformed(
                    self.line,
                    format!("line is not valid {}", self.encoding.name()),
                )
            })?
            .into_owned();
        if text.ends_with('\n') {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }
        Ok(Some(text))
    }

    fn read_record(&mut self) -> Result<Option<SourceRow>, CatalogError> {
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut start_line = self.line + 1;

        loop {
            let Some(text) = self.read_line()? else {
                if in_quotes {
                    return Err(CatalogError::malformed(start_line, "unterminated quoted field"));
                }
                return Ok(None);
            };

            if !in_quotes && fields.is_empty() && text.trim().is_empty() {
                start_line = self.line + 1;
                continue;
            }

            let mut chars = text.chars().peekable();
            while let Some(c) = chars.next() {
                if in_quotes {
                    if c == QUOTE {
                        if chars.peek() == Some(&QUOTE) {
                            field.push(QUOTE);
                            chars.next();
                        } else {
                            in_quotes = false;
                        }
                    } else {
                        field.push(c);
                    }
                } else if c == QUOTE && field.is_empty() {
                    in_quotes = true;
                } else if c == self.delimiter {
                    fields.push(std::mem::take(&mut field));
                } else {
                    field.push(c);
                }
            }

            if in_quotes {
                field.push('\n');
                continue;
            }

            fields.push(field);
            return Ok(Some(SourceRow {
                line: start_line,
                fields,
            }));
        }
    }
}

impl<R: BufRead> Iterator for DelimitedReader<R> {
    type Item = Result<SourceRow, CatalogError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
