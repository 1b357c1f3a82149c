mod error;
mod tui;

pub mod browser;
pub mod cache;
pub mod category;
pub mod config;
pub mod fs;
pub mod metrics;
pub mod reader;
pub mod scraper;
pub mod table;

pub use browser::{Browser, Chrome, Session};
pub use cache::Cache;
pub use category::Category;
pub use config::Config;
pub use error::{Error, Result};
pub use metrics::{growth_rate, Value};
pub use scraper::{RoicScraper, Ticker};
pub use table::Table;

/// Format the time elapsed since `time`, for trace lines.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:?}", time.elapsed())
}
