//! FASTA/gzip record adapter.
//!
//! This module's only job is to turn a file on disk into a restartable,
//! lazy sequence of `(header, symbols)` records with multi-line sequences
//! already concatenated. The core ([`ColumnBuilder`](crate::builder::ColumnBuilder),
//! [`SuccinctAlignment`](crate::alignment::SuccinctAlignment)) consumes only
//! `record.symbols[i]`; it does not know or care whether the bytes came from
//! a plain file or a `flate2` gzip stream.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// One parsed FASTA record: a header line (without the leading `>`) and its
/// concatenated, upper-cased sequence bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FastaRecord {
    pub header: Vec<u8>,
    pub symbols: Vec<u8>,
}

/// Open `path` as a byte stream, transparently un-gzipping when
/// `compressed` is set. The adapter is restartable: calling this again with
/// the same arguments reopens the file from the start, which is exactly
/// what [`SuccinctAlignment`]'s batched build relies on.
pub fn open(path: impl AsRef<Path>, compressed: bool) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::InputNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::persist_io(format!("opening {}", path.display()), e)
        }
    })?;

    if compressed {
        let decoder = flate2_compat::GzReader::new(file)?;
        Ok(Box::new(BufReader::new(decoder)))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Parse every record out of `reader` into a lazy iterator.
///
/// Multi-line sequences are concatenated; headers are the text of the `>`
/// line with the marker stripped and trailing newline removed. Symbols are
/// upper-cased as they are read.
pub fn records(reader: Box<dyn BufRead>) -> FastaRecords {
    FastaRecords {
        reader,
        pending_header: None,
        done: false,
    }
}

/// Convenience: open `path` and parse its records in one call.
pub fn records_from_path(path: impl AsRef<Path>, compressed: bool) -> Result<FastaRecords> {
    Ok(records(open(path, compressed)?))
}

/// Lazy, restartable iterator over FASTA records.
pub struct FastaRecords {
    reader: Box<dyn BufRead>,
    pending_header: Option<Vec<u8>>,
    done: bool,
}

impl Iterator for FastaRecords {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Result<FastaRecord>> {
        if self.done {
            return None;
        }

        let mut header = match self.pending_header.take() {
            Some(h) => h,
            None => match self.read_header_line() {
                Ok(Some(h)) => h,
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            },
        };
        trim_trailing_newline(&mut header);
        header.drain(..1);

        let mut symbols = Vec::new();
        loop {
            let mut line = Vec::new();
            match self.reader.read_until(b'\n', &mut line) {
                Ok(0) => {
                    self.done = true;
                    break;
                }
                Ok(_) => {
                    if line.first() == Some(&b'>') {
                        self.pending_header = Some(line);
                        break;
                    }
                    trim_trailing_newline(&mut line);
                    symbols.extend(line.iter().map(|b| b.to_ascii_uppercase()));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(Error::persist_io("reading FASTA stream", e)));
                }
            }
        }

        Some(Ok(FastaRecord { header, symbols }))
    }
}

impl FastaRecords {
    fn read_header_line(&mut self) -> Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let n = self
            .reader
            .read_until(b'\n', &mut line)
            .map_err(|e| Error::persist_io("reading FASTA stream", e))?;
        if n == 0 {
            return Ok(None);
        }
        if line.first() != Some(&b'>') {
            return Err(Error::FormatInvalid {
                reason: "expected a record to start with '>'".into(),
            });
        }
        Ok(Some(line))
    }
}

fn trim_trailing_newline(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
}

/// Thin seam around `flate2` so the rest of this module only ever talks to
/// `Read`/`BufRead`.
mod flate2_compat {
    use super::*;

    pub struct GzReader {
        inner: flate2::read::GzDecoder<File>,
    }

    impl GzReader {
        pub fn new(file: File) -> Result<Self> {
            Ok(Self {
                inner: flate2::read::GzDecoder::new(file),
            })
        }
    }

    impl Read for GzReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.inner.read(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(input: &[u8]) -> Vec<FastaRecord> {
        records(Box::new(BufReader::new(Cursor::new(input.to_vec()))))
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn single_record_single_line() {
        let recs = parse(b">seq1\nACGT\n");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].header, b"seq1");
        assert_eq!(recs[0].symbols, b"ACGT");
    }

    #[test]
    fn multi_line_sequence_concatenates() {
        let recs = parse(b">seq1\nACGT\nACGT\n");
        assert_eq!(recs[0].symbols, b"ACGTACGT");
    }

    #[test]
    fn multiple_records() {
        let recs = parse(b">a\nAC\n>b\nGT\n");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].header, b"a");
        assert_eq!(recs[0].symbols, b"AC");
        assert_eq!(recs[1].header, b"b");
        assert_eq!(recs[1].symbols, b"GT");
    }

    #[test]
    fn case_normalization() {
        let recs = parse(b">a\nacgt\n");
        assert_eq!(recs[0].symbols, b"ACGT");
    }

    #[test]
    fn no_trailing_newline_at_eof() {
        let recs = parse(b">a\nACGT");
        assert_eq!(recs[0].symbols, b"ACGT");
    }

    #[test]
    fn crlf_line_endings() {
        let recs = parse(b">a\r\nACGT\r\n");
        assert_eq!(recs[0].header, b"a");
        assert_eq!(recs[0].symbols, b"ACGT");
    }

    #[test]
    fn missing_leading_marker_is_format_invalid() {
        let mut it = records(Box::new(BufReader::new(Cursor::new(b"ACGT\n".to_vec()))));
        match it.next() {
            Some(Err(Error::FormatInvalid { .. })) => {}
            other => panic!("expected FormatInvalid, got {other:?}"),
        }
    }

    #[test]
    fn open_missing_file_is_input_not_found() {
        match open("/nonexistent/path/does-not-exist.fasta", false) {
            Err(Error::InputNotFound { .. }) => {}
            other => panic!("expected InputNotFound, got {other:?}"),
        }
    }
}
