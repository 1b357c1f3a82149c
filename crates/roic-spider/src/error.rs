use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while configuring, scraping or caching.
#[derive(Debug, Error)]
pub enum Error {
    /// A file (config or cache entry) could not be read or written.
    #[error("io failed at {path:?}, error({source})")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A JSON file is malformed, or a required key is missing.
    #[error("failed to parse {path:?}, error({source})")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A cache entry exists but is not a table.
    #[error("malformed cache file {path:?}, error({source})")]
    Csv { path: PathBuf, source: csv::Error },

    /// The chromedriver binary could not be spawned.
    #[error("failed to launch chromedriver at {path:?}, error({source})")]
    DriverLaunch {
        path: PathBuf,
        source: std::io::Error,
    },

    /// chromedriver never accepted a session.
    #[error("failed to start a webdriver session, error({0})")]
    Session(#[from] fantoccini::error::NewSessionError),

    /// A webdriver command was rejected.
    #[error("webdriver command failed, error({0})")]
    Command(#[from] fantoccini::error::CmdError),

    /// A required element never appeared.
    #[error("element not found: {xpath}")]
    NotFound { xpath: String, tag: Option<String> },

    #[error("json error({0})")]
    Json(#[from] serde_json::Error),

    #[error("unknown category `{0}`")]
    UnknownCategory(String),

    #[error("invalid progress template, error({0})")]
    Template(#[from] indicatif::style::TemplateError),
}

pub type Result<T> = std::result::Result<T, Error>;
