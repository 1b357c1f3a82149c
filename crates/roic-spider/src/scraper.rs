use crate::browser::{Browser, Chrome};
use crate::category::Page;
use crate::{table, Cache, Category, Config, Error, Result, Table};
use indicatif::ProgressBar;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Root of every quote page on roic.ai.
pub const BASE_URL: &str = "https://roic.ai/quote";

/// The company being scraped, and where its tables are cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticker {
    pub symbol: String,
    pub country: String,
    pub base_url: String,
    pub dir: PathBuf,
}

impl Ticker {
    pub fn new(symbol: &str, country: &str, export_path: &Path) -> Self {
        let symbol = symbol.trim().to_uppercase();
        let country = country.trim().to_uppercase();
        Self {
            base_url: format!("{BASE_URL}/{symbol}:{country}"),
            dir: export_path.join(&symbol),
            symbol,
            country,
        }
    }

    pub fn url(&self, page: Page) -> String {
        format!("{}{}", self.base_url, page.path())
    }
}

/// Cached access to every roic.ai table of one ticker.
///
/// [`get`](RoicScraper::get) serves from the cache when it can;
/// [`update`](RoicScraper::update) always goes to the site. Both persist what
/// they scrape.
pub struct RoicScraper<B: Browser = Chrome> {
    ticker: Ticker,
    browser: B,
    cache: Cache,
    wait: Option<Duration>,
    tui: bool,
}

impl RoicScraper<Chrome> {
    /// A scraper driving Chrome as configured.
    pub async fn from_config(config: &Config, symbol: &str, country: &str) -> Result<Self> {
        let scraper = Self::new(
            symbol,
            country,
            &config.data_export_path,
            Chrome::from_config(config),
        )
        .await?;
        Ok(scraper.with_wait(Some(config.wait_timeout())))
    }
}

impl<B: Browser> RoicScraper<B> {
    /// Creates the export and ticker directories if they are missing.
    pub async fn new(
        symbol: &str,
        country: &str,
        export_path: impl AsRef<Path>,
        browser: B,
    ) -> Result<Self> {
        let ticker = Ticker::new(symbol, country, export_path.as_ref());
        tokio::fs::create_dir_all(&ticker.dir)
            .await
            .map_err(|source| Error::Io {
                path: ticker.dir.clone(),
                source,
            })?;
        debug!("ticker directory ready at {:?}", ticker.dir);

        Ok(Self {
            cache: Cache::new(&ticker.dir),
            ticker,
            browser,
            wait: None,
            tui: false,
        })
    }

    /// Wait up to `wait` for each table to show up before reading it.
    pub fn with_wait(mut self, wait: Option<Duration>) -> Self {
        self.wait = wait;
        self
    }

    /// Show a progress bar over multi-category fetches.
    pub fn with_tui(mut self, tui: bool) -> Self {
        self.tui = tui;
        self
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Scrape `category` from the site, without touching the cache.
    ///
    /// The session is closed whether or not extraction succeeds.
    pub async fn scrape(&self, category: Category) -> Result<Table> {
        let time = std::time::Instant::now();
        let url = self.ticker.url(category.page());
        debug!("scraping {category} for {} from {url}", self.ticker.symbol);

        let mut session = self.browser.open(&url).await?;
        let extracted = table::extract(session.as_mut(), &category.selectors(), self.wait).await;
        if let Err(err) = session.close().await {
            warn!("failed to close browser session, error({err})");
        }

        let table = extracted?;
        info!(
            "[{}] {category} scraped: {} rows x {} periods. {}",
            self.ticker.symbol,
            table.rows().len(),
            table.columns().len(),
            crate::time_elapsed(time)
        );
        Ok(table)
    }

    /// The cached table, scraping and caching it first if absent.
    pub async fn get(&self, category: Category) -> Result<Table> {
        if let Some(table) = self.cache.load(category).await? {
            debug!("[{}] {category} served from cache", self.ticker.symbol);
            return Ok(table);
        }
        self.update(category).await
    }

    /// Scrape `category` and overwrite its cache entry.
    pub async fn update(&self, category: Category) -> Result<Table> {
        let table = self.scrape(category).await?;
        self.cache.store(category, &table).await?;
        Ok(table)
    }

    /// [`update`](Self::update) when `update` is set, [`get`](Self::get) otherwise.
    pub async fn fetch(&self, category: Category, update: bool) -> Result<Table> {
        if update {
            self.update(category).await
        } else {
            self.get(category).await
        }
    }

    /// Fetch several categories one after another.
    pub async fn fetch_all(
        &self,
        categories: &[Category],
        update: bool,
    ) -> Result<BTreeMap<Category, Table>> {
        let pb = crate::tui::category_progress(categories.len(), self.tui)?;
        self.fetch_with_progress(categories, update, &pb).await
    }

    /// The bar is cleared on failure too, so it never lingers above the error.
    async fn fetch_with_progress(
        &self,
        categories: &[Category],
        update: bool,
        pb: &ProgressBar,
    ) -> Result<BTreeMap<Category, Table>> {
        let mut tables = BTreeMap::new();
        for &category in categories {
            pb.set_message(category.name());
            match self.fetch(category, update).await {
                Ok(table) => {
                    tables.insert(category, table);
                    pb.inc(1);
                }
                Err(err) => {
                    pb.finish_and_clear();
                    return Err(err);
                }
            }
        }

        pb.finish_and_clear();
        Ok(tables)
    }

    /// Income statement, balance sheet and cash flow.
    pub async fn financial_statements(&self, update: bool) -> Result<BTreeMap<Category, Table>> {
        self.fetch_all(&Category::STATEMENTS, update).await
    }

    /// Profitability, credit, liquidity, working capital, enterprise value,
    /// multiples and per-share data.
    pub async fn ratios(&self, update: bool) -> Result<BTreeMap<Category, Table>> {
        self.fetch_all(&Category::RATIOS, update).await
    }
}
