mod common;

use common::{sample_site, table_elements, FakeBrowser};
use roic_spider::{Category, Error, RoicScraper, Table};
use std::path::Path;
use std::time::Duration;

async fn scraper(export: &Path, browser: &FakeBrowser) -> RoicScraper<FakeBrowser> {
    RoicScraper::new("aapl", "us", export, browser.clone())
        .await
        .unwrap()
}

#[tokio::test]
async fn get_scrapes_once_then_serves_cache() {
    let dir = tempfile::tempdir().unwrap();
    let browser = sample_site("AAPL");
    let scraper = scraper(dir.path(), &browser).await;

    let first = scraper.get(Category::CashFlow).await.unwrap();
    assert_eq!(browser.opened(), ["https://roic.ai/quote/AAPL:US/financials"]);
    assert!(dir.path().join("AAPL").join("cash_flow.csv").is_file());

    let second = scraper.get(Category::CashFlow).await.unwrap();
    assert_eq!(browser.opened().len(), 1);
    assert_eq!(first, second);

    assert_eq!(second.columns(), ["2022", "2023"]);
    assert_eq!(second.cell("Revenue", "2022"), Some("394328"));
    assert_eq!(second.cell("Net Income", "2023"), None);
}

#[tokio::test]
async fn blank_cells_survive_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let category = Category::Profitability;
    let elements = table_elements(
        &category.selectors(),
        &["ROIC"],
        &["2022 FY", "2023 FY"],
        &[&[Some(""), Some("31.2")]],
    );
    let browser = FakeBrowser::new().page("https://roic.ai/quote/AAPL:US/ratios", elements);
    let scraper = scraper(dir.path(), &browser).await;

    let scraped = scraper.update(category).await.unwrap();
    assert_eq!(scraped.cell("ROIC", "2022"), None);

    let cached = scraper.cache().load(category).await.unwrap().unwrap();
    assert_eq!(cached, scraped);
}

#[tokio::test]
async fn get_never_opens_a_browser_on_cache_hit() {
    let dir = tempfile::tempdir().unwrap();
    let browser = sample_site("AAPL");
    let scraper = scraper(dir.path(), &browser).await;

    let mut cached = Table::with_columns(["2019"]);
    cached.set("Revenue", "2019", Some("1".into()));
    scraper.cache().store(Category::Summary, &cached).await.unwrap();

    let table = scraper.get(Category::Summary).await.unwrap();
    assert_eq!(table, cached);
    assert!(browser.opened().is_empty());
}

#[tokio::test]
async fn update_always_scrapes_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let browser = sample_site("AAPL");
    let scraper = scraper(dir.path(), &browser).await;

    let mut stale = Table::with_columns(["2019"]);
    stale.set("Revenue", "2019", Some("1".into()));
    scraper.cache().store(Category::Multiples, &stale).await.unwrap();

    let fresh = scraper.update(Category::Multiples).await.unwrap();
    assert_eq!(browser.opened(), ["https://roic.ai/quote/AAPL:US/ratios"]);
    assert_ne!(fresh, stale);

    let reloaded = scraper.cache().load(Category::Multiples).await.unwrap();
    assert_eq!(reloaded, Some(fresh));

    scraper.update(Category::Multiples).await.unwrap();
    assert_eq!(browser.opened().len(), 2);
    assert_eq!(browser.closed(), 2);
}

#[tokio::test]
async fn statements_honor_update_flag() {
    let dir = tempfile::tempdir().unwrap();
    let browser = sample_site("AAPL");
    let scraper = scraper(dir.path(), &browser).await;

    let tables = scraper.financial_statements(false).await.unwrap();
    assert_eq!(tables.keys().copied().collect::<Vec<_>>(), Category::STATEMENTS);
    assert_eq!(browser.opened().len(), 3);

    // everything cached: the cached path opens nothing
    scraper.financial_statements(false).await.unwrap();
    assert_eq!(browser.opened().len(), 3);

    // update ignores the cache for every member
    scraper.financial_statements(true).await.unwrap();
    assert_eq!(browser.opened().len(), 6);
    assert_eq!(browser.closed(), 6);
}

#[tokio::test]
async fn ratios_honor_update_flag() {
    let dir = tempfile::tempdir().unwrap();
    let browser = sample_site("AAPL");
    let scraper = scraper(dir.path(), &browser).await;

    let tables = scraper.ratios(true).await.unwrap();
    assert_eq!(tables.keys().copied().collect::<Vec<_>>(), Category::RATIOS);
    assert_eq!(browser.opened().len(), 7);
    assert!(browser
        .opened()
        .iter()
        .all(|url| url == "https://roic.ai/quote/AAPL:US/ratios"));

    let cached = scraper.ratios(false).await.unwrap();
    assert_eq!(browser.opened().len(), 7);
    assert_eq!(cached, tables);
}

#[tokio::test]
async fn session_closes_when_extraction_fails() {
    let dir = tempfile::tempdir().unwrap();
    // nothing on the page, and the first label is required
    let browser = FakeBrowser::new();
    let scraper = scraper(dir.path(), &browser)
        .await
        .with_wait(Some(Duration::from_millis(5)));

    let err = scraper.get(Category::Credit).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(browser.opened().len(), 1);
    assert_eq!(browser.closed(), 1);

    // a failed scrape leaves no cache entry behind
    assert_eq!(scraper.cache().load(Category::Credit).await.unwrap(), None);
}

#[tokio::test]
async fn each_category_reads_its_own_section() {
    let dir = tempfile::tempdir().unwrap();
    // only the balance sheet is on the financials page
    let browser = FakeBrowser::new().page(
        "https://roic.ai/quote/AAPL:US/financials",
        common::sample(Category::BalanceSheet),
    );
    let scraper = scraper(dir.path(), &browser).await;

    let balance = scraper.scrape(Category::BalanceSheet).await.unwrap();
    let income = scraper.scrape(Category::IncomeStatement).await.unwrap();

    assert_eq!(balance.rows().len(), 2);
    assert!(income.is_empty());
}
