//! The top-level container: `L` ordered [`SuccinctColumn`]s plus `(S, L)`.

use crate::builder::ColumnBuilder;
use crate::column::SuccinctColumn;
use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::fasta;

#[cfg(not(any(test, feature = "std")))]
use alloc::vec::Vec;

/// A fully built, read-only multiple sequence alignment.
///
/// Produced either by [`SuccinctAlignment::build`] from a FASTA source, or
/// by [`SuccinctAlignment::load`] from a previously [`store`](Self::store)d
/// directory. There is no mutation API after construction; both paths hand
/// back an alignment already in the `READY` state.
pub struct SuccinctAlignment {
    rows: usize,
    columns: Vec<SuccinctColumn>,
}

impl SuccinctAlignment {
    /// Build from a FASTA (optionally gzip) file at `path`.
    ///
    /// Two passes over the input: a pre-pass determines `S` and `L` and
    /// verifies every record has length `L`; then one batched pass per
    /// `config.batch_width` columns, each reopening the stream fresh so the
    /// [`ColumnBuilder`] only ever sees rows in order.
    #[cfg(feature = "std")]
    pub fn build(path: impl AsRef<std::path::Path>, compressed: bool, config: &BuildConfig) -> Result<Self> {
        let path = path.as_ref();
        let (rows, cols) = Self::scan_dimensions(path, compressed)?;

        let mut columns: Vec<SuccinctColumn> = Vec::with_capacity(cols);
        let mut position = 0;
        while position < cols {
            let width = config.batch_width.min(cols - position);
            let mut builder = ColumnBuilder::new(position, width, rows, config);
            for record in fasta::records_from_path(path, compressed)? {
                let record = record?;
                builder.push_row(&record.symbols)?;
            }
            columns.extend(builder.finish());
            position += width;
        }

        Ok(Self { rows, columns })
    }

    #[cfg(feature = "std")]
    fn scan_dimensions(path: &std::path::Path, compressed: bool) -> Result<(usize, usize)> {
        let mut rows = 0usize;
        let mut cols: Option<usize> = None;
        for (i, record) in fasta::records_from_path(path, compressed)?.enumerate() {
            let record = record?;
            let len = record.symbols.len();
            match cols {
                None => cols = Some(len),
                Some(expected) if expected != len => {
                    return Err(Error::LengthMismatch {
                        record: i,
                        expected,
                        found: len,
                    });
                }
                _ => {}
            }
            rows += 1;
        }
        Ok((rows, cols.unwrap_or(0)))
    }

    /// Number of columns `L`.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of rows `S`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns `L`.
    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    /// `(L, S)`, matching the order the CLI prints with `--infos`.
    pub fn info(&self) -> (usize, usize) {
        (self.columns.len(), self.rows)
    }

    fn column(&self, col: usize) -> Result<&SuccinctColumn> {
        self.columns.get(col).ok_or(Error::IndexOutOfRange {
            index: col,
            len: self.columns.len(),
        })
    }

    /// The symbol at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Result<u8> {
        self.column(col)?.get(row)
    }

    /// The full symbol sequence of `row`, concatenating `cell(row, c)` for
    /// every column. O(L) with one `rank1` per column.
    pub fn row(&self, row: usize) -> Result<Vec<u8>> {
        if row >= self.rows {
            return Err(Error::IndexOutOfRange {
                index: row,
                len: self.rows,
            });
        }
        self.columns.iter().map(|c| c.get(row)).collect()
    }

    /// Read-only access to column `col`'s sparse bit vector.
    pub fn column_vector(&self, col: usize) -> Result<&crate::bits::SparseBitVector> {
        Ok(self.column(col)?.bits())
    }

    /// Read-only access to column `col`'s run-head symbol string.
    pub fn column_heads(&self, col: usize) -> Result<&[u8]> {
        Ok(self.column(col)?.heads())
    }

    /// Serialized footprint of a single column.
    pub fn column_size_in_bytes(&self, col: usize) -> Result<usize> {
        Ok(self.column(col)?.size_in_bytes())
    }

    /// Serialized footprint of the whole alignment: the sum across columns.
    pub fn size_in_bytes(&self) -> usize {
        self.columns.iter().map(|c| c.size_in_bytes()).sum()
    }

    /// Indices of columns whose serialized size is at least
    /// `factor * mean_size`. Empty when the alignment has no columns.
    pub fn columns_over_mean(&self, factor: f64) -> Vec<usize> {
        if self.columns.is_empty() {
            return Vec::new();
        }
        let total: usize = self.columns.iter().map(|c| c.size_in_bytes()).sum();
        let mean = total as f64 / self.columns.len() as f64;
        let threshold = factor * mean;
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.size_in_bytes() as f64 >= threshold)
            .map(|(i, _)| i)
            .collect()
    }

    /// Write one CSV row per column: `(column_index, size_bytes, cumulative_size)`.
    ///
    /// With `sort == false`, rows are in natural column order and
    /// `cumulative_size` accumulates in that order. With `sort == true`,
    /// rows are ordered by ascending `size_bytes` and `cumulative_size`
    /// accumulates in that sorted order instead.
    #[cfg(feature = "std")]
    pub fn size_to_csv(&self, path: impl AsRef<std::path::Path>, sort: bool) -> Result<()> {
        let path = path.as_ref();
        let mut sizes: Vec<(usize, usize)> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (i, c.size_in_bytes()))
            .collect();
        if sort {
            sizes.sort_by_key(|&(_, size)| size);
        }

        let mut writer = csv::Writer::from_path(path)
            .map_err(|e| Error::persist_io(format!("opening {}", path.display()), csv_to_io(e)))?;
        writer
            .write_record(["column_index", "size_bytes", "cumulative_size"])
            .map_err(|e| Error::persist_io("writing CSV header", csv_to_io(e)))?;

        let mut cumulative = 0usize;
        for (index, size) in sizes {
            cumulative += size;
            writer
                .write_record([index.to_string(), size.to_string(), cumulative.to_string()])
                .map_err(|e| Error::persist_io("writing CSV row", csv_to_io(e)))?;
        }
        writer
            .flush()
            .map_err(|e| Error::persist_io(format!("flushing {}", path.display()), e))?;
        Ok(())
    }

    /// Persist to directory `dir`: `info.txt` plus each column's sibling
    /// artifacts, per column index.
    #[cfg(feature = "std")]
    pub fn store(&self, dir: impl AsRef<std::path::Path>) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::persist_io(format!("creating {}", dir.display()), e))?;

        let info_path = dir.join("info.txt");
        std::fs::write(&info_path, format!("{},{}", self.rows, self.columns.len()))
            .map_err(|e| Error::persist_io(format!("writing {}", info_path.display()), e))?;

        for (index, column) in self.columns.iter().enumerate() {
            column.store(dir, index)?;
        }
        Ok(())
    }

    /// Load a previously [`store`](Self::store)d directory. Enters the
    /// ready state directly; no FASTA re-parsing occurs.
    #[cfg(feature = "std")]
    pub fn load(dir: impl AsRef<std::path::Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let info_path = dir.join("info.txt");
        let info = std::fs::read_to_string(&info_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::InputNotFound {
                    path: info_path.display().to_string(),
                }
            } else {
                Error::persist_io(format!("reading {}", info_path.display()), e)
            }
        })?;

        let (rows, cols) = parse_info_line(&info)?;

        let mut columns = Vec::with_capacity(cols);
        for index in 0..cols {
            columns.push(SuccinctColumn::load(dir, index)?);
        }

        Ok(Self { rows, columns })
    }

    /// Package a [`store`](Self::store)d directory as `<dir>.tar.gz` and
    /// remove the staging directory, matching the on-disk layout's archival
    /// step. Optional packaging around the directory contract; `load`
    /// itself only ever reads directories.
    #[cfg(feature = "cli")]
    pub fn archive(dir: impl AsRef<std::path::Path>) -> Result<std::path::PathBuf> {
        let dir = dir.as_ref();
        let archive_path = dir.with_extension("tar.gz");

        let file = std::fs::File::create(&archive_path)
            .map_err(|e| Error::persist_io(format!("creating {}", archive_path.display()), e))?;
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        let name = dir.file_name().ok_or_else(|| Error::FormatInvalid {
            reason: format!("{} has no directory name", dir.display()),
        })?;
        builder
            .append_dir_all(name, dir)
            .map_err(|e| Error::persist_io(format!("archiving {}", dir.display()), e))?;
        builder
            .into_inner()
            .map_err(|e| Error::persist_io("finishing tar stream", e))?
            .finish()
            .map_err(|e| Error::persist_io("finishing gzip stream", e))?;

        std::fs::remove_dir_all(dir)
            .map_err(|e| Error::persist_io(format!("removing {}", dir.display()), e))?;
        Ok(archive_path)
    }

    /// Extract `<project>.tar.gz` into `dest_dir` and [`load`](Self::load)
    /// it.
    #[cfg(feature = "cli")]
    pub fn load_archive(
        archive_path: impl AsRef<std::path::Path>,
        dest_dir: impl AsRef<std::path::Path>,
    ) -> Result<Self> {
        let archive_path = archive_path.as_ref();
        let dest_dir = dest_dir.as_ref();

        let file = std::fs::File::open(archive_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::InputNotFound {
                    path: archive_path.display().to_string(),
                }
            } else {
                Error::persist_io(format!("opening {}", archive_path.display()), e)
            }
        })?;
        let decoder = flate2::read::GzDecoder::new(file);
        let mut archive = tar::Archive::new(decoder);
        archive
            .unpack(dest_dir)
            .map_err(|e| Error::persist_io(format!("extracting {}", archive_path.display()), e))?;

        let project_dir = archive_path
            .file_stem()
            .and_then(|s| std::path::Path::new(s).file_stem())
            .map(|name| dest_dir.join(name))
            .unwrap_or_else(|| dest_dir.to_path_buf());

        Self::load(project_dir)
    }
}

#[cfg(feature = "std")]
fn parse_info_line(info: &str) -> Result<(usize, usize)> {
    let invalid = || Error::FormatInvalid {
        reason: format!("malformed info.txt contents: {info:?}"),
    };
    let mut parts = info.trim().split(',');
    let rows: usize = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let cols: usize = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok((rows, cols))
}

#[cfg(feature = "std")]
fn csv_to_io(e: csv::Error) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e)
}
