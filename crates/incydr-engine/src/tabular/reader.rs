use crate::{Error, Result};
use incydr_types::{Record, Row, Schema};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

const STREAM_ORIGIN: &str = "<stream>";

/// Rows of a CSV source as column → cell mappings.
///
/// Every empty cell is normalized to absent. Rows shorter than the header are
/// padded with absent cells; cells beyond the header are dropped.
pub struct DictRows<R: io::Read> {
    reader: csv::Reader<R>,
    columns: Arc<[String]>,
    buf: csv::StringRecord,
    line: u64,
    failed: bool,
}

impl<R: io::Read> DictRows<R> {
    fn new<S: AsRef<str>>(source: R, field_names: Option<&[S]>) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(field_names.is_none())
            .flexible(true)
            .from_reader(source);

        let columns: Arc<[String]> = match field_names {
            Some(names) => names.iter().map(|n| n.as_ref().to_string()).collect(),
            None => reader.headers()?.iter().map(String::from).collect(),
        };

        Ok(Self {
            reader,
            columns,
            buf: csv::StringRecord::new(),
            line: 0,
            failed: false,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Source line of the most recently read row (header is line 1).
    pub fn line(&self) -> u64 {
        self.line
    }

    fn to_row(&self) -> Row {
        if self.buf.len() > self.columns.len() {
            tracing::warn!(
                line = self.line,
                extra = self.buf.len() - self.columns.len(),
                "ignoring cells beyond the header"
            );
        }

        let cells = self
            .buf
            .iter()
            .take(self.columns.len())
            .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
            .collect();
        Row::new(Arc::clone(&self.columns), cells)
    }
}

impl<R: io::Read> Iterator for DictRows<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.reader.read_record(&mut self.buf) {
            Ok(false) => None,
            Ok(true) => {
                self.line = self.buf.position().map(|p| p.line()).unwrap_or(0);
                Some(Ok(self.to_row()))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err.into()))
            }
        }
    }
}

/// Read a CSV stream as mappings. With `field_names` the first line is data,
/// otherwise it is the header.
pub fn read_dict_from_csv<R: io::Read, S: AsRef<str>>(
    source: R,
    field_names: Option<&[S]>,
) -> Result<DictRows<R>> {
    DictRows::new(source, field_names)
}

/// [`read_dict_from_csv`] over a file opened for the duration of the read.
pub fn read_dict_from_path<S: AsRef<str>>(
    path: impl AsRef<Path>,
    field_names: Option<&[S]>,
) -> Result<DictRows<File>> {
    let file = File::open(path.as_ref())?;
    DictRows::new(file, field_names)
}

/// Typed records parsed from a CSV source, see [`read_models_from_csv`].
pub struct ModelRows<R: io::Read> {
    rows: DictRows<R>,
    schema: &'static Schema,
    origin: String,
    data_row: usize,
    first_error: Option<Error>,
    deferred: Option<Error>,
    done: bool,
}

impl<R: io::Read> Iterator for ModelRows<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let row = match self.rows.next() {
                Some(Ok(row)) => row,
                Some(Err(err)) => {
                    self.done = true;
                    // The remembered row failure goes out first, the CSV error after it.
                    if let Some(first) = self.first_error.take() {
                        self.deferred = Some(err);
                        return Some(Err(first));
                    }
                    return Some(Err(err));
                }
                None => {
                    self.done = true;
                    return self.first_error.take().map(Err);
                }
            };
            self.data_row += 1;

            match Record::from_row(self.schema, &row) {
                Ok(record) => return Some(Ok(record)),
                Err(detail) => {
                    tracing::warn!(
                        row = self.data_row,
                        origin = %self.origin,
                        "skipping row that failed validation"
                    );
                    if self.first_error.is_none() {
                        self.first_error = Some(Error::RowValidation {
                            row: self.data_row,
                            line: self.rows.line(),
                            origin: self.origin.clone(),
                            detail,
                        });
                    }
                }
            }
        }
        self.deferred.take().map(Err)
    }
}

/// Parse every row of a CSV stream into a record of `schema`.
///
/// A row that fails validation does not stop the read: later rows are still
/// yielded, and once the source is exhausted the iterator yields one
/// [`Error::RowValidation`] for the first bad row. Malformed CSV ends the read
/// immediately; a row failure seen before it is still yielded, ahead of the
/// CSV error.
pub fn read_models_from_csv<R: io::Read>(
    schema: &'static Schema,
    source: R,
) -> Result<ModelRows<R>> {
    Ok(ModelRows {
        rows: DictRows::new::<&str>(source, None)?,
        schema,
        origin: STREAM_ORIGIN.to_string(),
        data_row: 0,
        first_error: None,
        deferred: None,
        done: false,
    })
}

/// [`read_models_from_csv`] over a file opened for the duration of the read.
pub fn read_models_from_path(
    schema: &'static Schema,
    path: impl AsRef<Path>,
) -> Result<ModelRows<File>> {
    let path = path.as_ref();
    let mut rows = read_models_from_csv(schema, File::open(path)?)?;
    rows.origin = path.display().to_string();
    Ok(rows)
}
