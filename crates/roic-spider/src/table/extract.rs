use super::Table;
use crate::browser::Session;
use crate::reader::{self, Wait};
use crate::Result;
use std::borrow::Cow;
use std::time::Duration;
use tracing::{debug, trace};

/// Cell text the site shows for "no value".
pub const MISSING_PAIR: &str = "- -";

/// An XPath with `{row}` and/or `{col}` placeholders (1-based).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template(Cow<'static, str>);

impl Template {
    pub const fn new(template: &'static str) -> Self {
        Self(Cow::Borrowed(template))
    }

    pub fn row(&self, row: u32) -> String {
        self.0.replace("{row}", &row.to_string())
    }

    pub fn col(&self, col: u32) -> String {
        self.0.replace("{col}", &col.to_string())
    }

    pub fn cell(&self, row: u32, col: u32) -> String {
        self.0
            .replace("{row}", &row.to_string())
            .replace("{col}", &col.to_string())
    }
}

impl From<String> for Template {
    fn from(template: String) -> Self {
        Self(Cow::Owned(template))
    }
}

/// Where a table's labels and cells sit on the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSelectors {
    pub row_label: Template,
    pub col_label: Template,
    pub cell: Template,
    pub start_row: u32,
    pub start_col: u32,
}

impl TableSelectors {
    /// The roic.ai table layout below the `<table>` at `root`: the metric name
    /// sits in the first cell of each body row, periods start at the third
    /// header cell.
    pub fn under(root: &str) -> Self {
        Self {
            row_label: format!("{root}/tbody/tr[{{row}}]/td[1]/div/div[2]/span").into(),
            col_label: format!("{root}/thead/tr/th[{{col}}]/div/span").into(),
            cell: format!("{root}/tbody/tr[{{row}}]/td[{{col}}]/div/span").into(),
            start_row: 1,
            start_col: 3,
        }
    }
}

/// Row labels and period labels, in page order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Labels {
    pub rows: Vec<String>,
    pub cols: Vec<String>,
}

/// Scrape the whole table described by `selectors` from an open page.
///
/// With `wait`, the first row label is waited for and its absence is fatal;
/// every other read is immediate and a miss ends its scan.
pub async fn extract(
    session: &mut dyn Session,
    selectors: &TableSelectors,
    wait: Option<Duration>,
) -> Result<Table> {
    let time = std::time::Instant::now();

    let labels = labels(session, selectors, wait).await?;
    debug!(
        "discovered {} rows and {} columns",
        labels.rows.len(),
        labels.cols.len()
    );

    let table = fill(session, selectors, &labels).await?;
    debug!("table extracted. {}", crate::time_elapsed(time));

    Ok(table)
}

/// Walk the row-label and column-label templates until the first miss.
pub async fn labels(
    session: &mut dyn Session,
    selectors: &TableSelectors,
    wait: Option<Duration>,
) -> Result<Labels> {
    let mut labels = Labels::default();

    // scrape the row labels
    let mut row = selectors.start_row;
    let mut first = Wait::maybe(wait).tagged("first row label");
    while let Some(raw) = reader::read(session, &selectors.row_label.row(row), first).await? {
        let label = clean_row_label(&raw);
        trace!("row {row}: {label:?}");
        labels.rows.push(label);
        first = Wait::NONE;
        row += 1;
    }

    // scrape the column labels
    let mut col = selectors.start_col;
    while let Some(raw) = reader::read(session, &selectors.col_label.col(col), Wait::NONE).await? {
        let label = clean_col_label(&raw);
        trace!("col {col}: {label:?}");
        labels.cols.push(label);
        col += 1;
    }

    Ok(labels)
}

/// Read every data cell under the discovered labels.
///
/// Blank cells and [`MISSING_PAIR`] are stored as missing.
pub async fn fill(
    session: &mut dyn Session,
    selectors: &TableSelectors,
    labels: &Labels,
) -> Result<Table> {
    let mut table = Table::with_columns(labels.cols.iter().cloned());

    let mut row = selectors.start_row;
    for row_label in &labels.rows {
        table.push_row(row_label);
        // column index resets for every row
        let mut col = selectors.start_col;
        for col_label in &labels.cols {
            let xpath = selectors.cell.cell(row, col);
            let value = reader::read(session, &xpath, Wait::NONE).await?;
            let value = value.map(|raw| clean_cell(&raw)).filter(|text| !text.is_empty());
            table.set(row_label, col_label, value);
            col += 1;
        }
        row += 1;
    }

    table.replace_with_missing(MISSING_PAIR);
    Ok(table)
}

/// Metric names lose digit-grouping commas, one leading space and then a
/// leading sign along with the space after it.
pub fn clean_row_label(raw: &str) -> String {
    let label = raw.replace(',', "");
    let label = label.strip_prefix(' ').unwrap_or(label.as_str());
    match label.strip_prefix(['+', '-']) {
        Some(unsigned) => unsigned.trim_start_matches(['+', '-']).trim_start().to_string(),
        None => label.to_string(),
    }
}

/// Period headers keep their first whitespace-delimited token only.
pub fn clean_col_label(raw: &str) -> String {
    raw.split_whitespace().next().unwrap_or_default().to_string()
}

/// Digit-grouping commas are dropped from cell text.
pub fn clean_cell(raw: &str) -> String {
    raw.replace(',', "")
}
