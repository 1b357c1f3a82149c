use crate::table::{Table, INDEX};
use crate::{Category, Error, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// The cached tables of one ticker: `<dir>/<category>.csv`.
///
/// An entry that exists is valid; it is only ever replaced wholesale. Missing
/// cells are written as empty fields, so a cell holding empty text reads back
/// as missing.
#[derive(Clone, Debug)]
pub struct Cache {
    dir: PathBuf,
}

/// What the cache holds for one category.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub category: Category,
    pub path: PathBuf,
    pub modified: Option<DateTime<Local>>,
}

impl Cache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, category: Category) -> PathBuf {
        self.dir.join(format!("{}.csv", category.name()))
    }

    /// The cached table, or `None` if the category was never stored.
    pub async fn load(&self, category: Category) -> Result<Option<Table>> {
        let path = self.path(category);
        let Some(bytes) = crate::fs::read_if_exists(&path).await? else {
            debug!("cache miss for {category} at {path:?}");
            return Ok(None);
        };

        trace!("cache hit for {category}; parsing {} bytes", bytes.len());
        let table = from_csv(&bytes).map_err(|source| Error::Csv { path, source })?;
        Ok(Some(table))
    }

    /// Write `table` as the entry for `category`, replacing any previous one.
    pub async fn store(&self, category: Category, table: &Table) -> Result<()> {
        let path = self.path(category);
        let bytes = to_csv(table).map_err(|source| Error::Csv {
            path: path.clone(),
            source,
        })?;
        crate::fs::write_atomic(&path, &bytes).await?;
        debug!("{category} cached at {path:?}");
        Ok(())
    }

    /// Every category with its entry's last-modified time, if cached.
    pub async fn status(&self) -> Result<Vec<Entry>> {
        let mut entries = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let path = self.path(category);
            let modified: Option<DateTime<Local>> = match tokio::fs::metadata(&path).await {
                Ok(meta) => Some(
                    meta.modified()
                        .map_err(|source| Error::Io {
                            path: path.clone(),
                            source,
                        })?
                        .into(),
                ),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
                Err(source) => return Err(Error::Io { path, source }),
            };
            entries.push(Entry {
                category,
                path,
                modified,
            });
        }
        Ok(entries)
    }
}

/// `index,<period>...` then one record per row; missing cells are empty fields.
fn to_csv(table: &Table) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(std::iter::once(INDEX).chain(table.columns().iter().map(String::as_str)))?;
    for row in table.rows() {
        wtr.write_record(
            std::iter::once(row.label.as_str())
                .chain(row.cells.iter().map(|cell| cell.as_deref().unwrap_or(""))),
        )?;
    }

    wtr.into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

fn from_csv(bytes: &[u8]) -> std::result::Result<Table, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let headers = rdr.headers()?.clone();
    let columns: Vec<&str> = headers.iter().skip(1).collect();
    let mut table = Table::with_columns(columns.iter().copied());

    for record in rdr.records() {
        let record = record?;
        let mut fields = record.iter();
        let label = fields.next().unwrap_or_default();
        table.push_row(label);
        for (col, field) in columns.iter().zip(fields) {
            let value = (!field.is_empty()).then(|| field.to_string());
            table.set(label, col, value);
        }
    }

    Ok(table)
}
