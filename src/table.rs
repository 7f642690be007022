//! Row-column table of paper metadata read from a delimited file.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::output::ensure_dir;

pub const TABLE_FILE: &str = "df.csv";
/// Header pandas gives an unnamed index column when the frame is read back.
pub const LEGACY_INDEX_COLUMN: &str = "Unnamed: 0";
pub const SUMMARY_COLUMN: &str = "summary";
pub const PUBLISHED_COLUMN: &str = "published";
pub const WORD_COUNT_COLUMN: &str = "word_count";
pub const YEAR_COLUMN: &str = "year";

/// One paper. Source columns are kept as text; derived columns are typed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    fields: IndexMap<String, String>,
    word_count: Option<usize>,
    year: Option<String>,
}

impl Document {
    pub fn new<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            word_count: None,
            year: None,
        }
    }

    /// Raw text of a source column.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn summary(&self) -> &str {
        self.field(SUMMARY_COLUMN).unwrap_or_default()
    }

    pub fn published(&self) -> &str {
        self.field(PUBLISHED_COLUMN).unwrap_or_default()
    }

    pub fn word_count(&self) -> Option<usize> {
        self.word_count
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub(crate) fn set_word_count(&mut self, count: usize) {
        self.word_count = Some(count);
    }

    pub(crate) fn set_year(&mut self, year: String) {
        self.year = Some(year);
    }
}

/// Ordered documents plus the column list, derived columns appended last.
#[derive(Debug, Clone, Default)]
pub struct DocumentTable {
    columns: Vec<String>,
    rows: Vec<Document>,
}

impl DocumentTable {
    pub fn new(columns: Vec<String>, rows: Vec<Document>) -> Self {
        Self { columns, rows }
    }

    /// Parse CSV with a header row, dropping the legacy index column and
    /// checking that every `required` column is present.
    pub fn from_reader<R: Read>(reader: R, origin: &Path, required: &[&str]) -> Result<Self> {
        let csv_err = |source: csv::Error| PipelineError::Csv {
            path: origin.to_path_buf(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let headers = reader.headers().map_err(csv_err)?.clone();

        let keep: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(_, name)| !is_legacy_index(name))
            .map(|(idx, name)| (idx, name.to_string()))
            .collect();
        if keep.len() != headers.len() {
            debug!("dropping {} legacy index column(s)", headers.len() - keep.len());
        }

        for name in required {
            if !keep.iter().any(|(_, col)| col == name) {
                return Err(PipelineError::MissingColumn((*name).to_string()));
            }
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            rows.push(Document::new(keep.iter().map(|(idx, name)| {
                (name.clone(), record.get(*idx).unwrap_or_default().to_string())
            })));
        }

        let columns = keep.into_iter().map(|(_, name)| name).collect();
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Document] {
        &self.rows
    }

    pub fn head(&self, n: usize) -> &[Document] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Text of `name` for every row, in row order.
    pub fn text_column(&self, name: &str) -> Result<Vec<&str>> {
        if !self.has_column(name) {
            return Err(PipelineError::MissingColumn(name.to_string()));
        }
        Ok(self
            .rows
            .iter()
            .map(|row| row.field(name).unwrap_or_default())
            .collect())
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Document] {
        &mut self.rows
    }

    pub(crate) fn append_column(&mut self, name: &str) {
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
    }
}

fn is_legacy_index(name: &str) -> bool {
    name == LEGACY_INDEX_COLUMN || name.is_empty()
}

/// Path of the input table inside `data_dir`.
pub fn table_path(data_dir: &Path) -> PathBuf {
    data_dir.join(TABLE_FILE)
}

/// Read `{data_dir}/df.csv`, requiring `text_column` and `published`.
pub fn read_data(data_dir: &Path, text_column: &str) -> Result<DocumentTable> {
    ensure_dir(data_dir)?;
    let path = table_path(data_dir);
    let file = fs::File::open(&path).map_err(|e| PipelineError::io(&path, e))?;
    let table = DocumentTable::from_reader(file, &path, &[text_column, PUBLISHED_COLUMN])?;
    info!("loaded {} documents from {}", table.len(), path.display());
    Ok(table)
}

/// Set each row's `word_count` to the number of single-space separated
/// pieces of `column`. Empty pieces count, so an empty cell counts 1.
pub fn add_word_count(table: &mut DocumentTable, column: &str) -> Result<()> {
    if !table.has_column(column) {
        return Err(PipelineError::MissingColumn(column.to_string()));
    }
    for row in table.rows_mut() {
        let count = row.field(column).unwrap_or_default().split(' ').count();
        row.set_word_count(count);
    }
    table.append_column(WORD_COUNT_COLUMN);
    Ok(())
}
