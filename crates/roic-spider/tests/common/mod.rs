#![allow(dead_code)]

use async_trait::async_trait;
use roic_spider::table::TableSelectors;
use roic_spider::{Browser, Category, Result, Session};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Page content keyed by XPath.
pub type Elements = HashMap<String, String>;

/// An in-memory browser: every URL maps to a fixed set of elements.
#[derive(Clone, Default)]
pub struct FakeBrowser {
    pages: HashMap<String, Elements>,
    opened: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicUsize>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `elements` into the page served at `url`.
    pub fn page(mut self, url: &str, elements: Elements) -> Self {
        self.pages.entry(url.to_string()).or_default().extend(elements);
        self
    }

    /// URLs opened so far, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn open(&self, url: &str) -> Result<Box<dyn Session>> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(Box::new(FakeSession {
            elements: self.pages.get(url).cloned().unwrap_or_default(),
            closed: self.closed.clone(),
        }))
    }
}

struct FakeSession {
    elements: Elements,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl Session for FakeSession {
    async fn text(&mut self, xpath: &str, _wait: Option<Duration>) -> Result<Option<String>> {
        Ok(self.elements.get(xpath).cloned())
    }

    async fn click(&mut self, xpath: &str, _wait: Option<Duration>, _scroll: bool) -> Result<bool> {
        Ok(self.elements.contains_key(xpath))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Lay out a table the way roic.ai does: labels and cells at their
/// positional selectors. `None` cells are left off the page.
pub fn table_elements(
    selectors: &TableSelectors,
    rows: &[&str],
    cols: &[&str],
    cells: &[&[Option<&str>]],
) -> Elements {
    let mut elements = Elements::new();
    for (r, label) in rows.iter().enumerate() {
        let row = selectors.start_row + r as u32;
        elements.insert(selectors.row_label.row(row), label.to_string());
    }
    for (c, label) in cols.iter().enumerate() {
        let col = selectors.start_col + c as u32;
        elements.insert(selectors.col_label.col(col), label.to_string());
    }
    for (r, values) in cells.iter().enumerate() {
        for (c, value) in values.iter().enumerate() {
            if let Some(value) = value {
                let xpath = selectors.cell.cell(selectors.start_row + r as u32, selectors.start_col + c as u32);
                elements.insert(xpath, value.to_string());
            }
        }
    }
    elements
}

/// A small two-by-two table for `category`.
pub fn sample(category: Category) -> Elements {
    table_elements(
        &category.selectors(),
        &["Revenue", "Net Income"],
        &["2022 FY", "2023 FY"],
        &[&[Some("394,328"), Some("383,285")], &[Some("99,803"), Some("- -")]],
    )
}

/// A browser serving [`sample`] tables for every category of `symbol`.
pub fn sample_site(symbol: &str) -> FakeBrowser {
    let mut browser = FakeBrowser::new();
    for category in Category::ALL {
        let url = format!("https://roic.ai/quote/{symbol}:US{}", category.page().path());
        browser = browser.page(&url, sample(category));
    }
    browser
}
