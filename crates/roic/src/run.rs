use crate::cli::{TickerArgs, ViewArgs};
use colored::Colorize;
use roic_spider::{growth_rate, Category, Config, RoicScraper, Table};
use std::collections::BTreeMap;
use tracing::{debug, info};

async fn scraper(config: &Config, ticker: &TickerArgs, tui: bool) -> anyhow::Result<RoicScraper> {
    let scraper = RoicScraper::from_config(config, &ticker.symbol, &ticker.country)
        .await?
        .with_tui(tui);
    debug!("scraper ready for {}", scraper.ticker().base_url);
    Ok(scraper)
}

/// Fetch and print `categories`.
pub(crate) async fn tables(
    config: &Config,
    ticker: &TickerArgs,
    categories: &[Category],
    view: &ViewArgs,
    tui: bool,
) -> anyhow::Result<()> {
    let time = std::time::Instant::now();
    let scraper = scraper(config, ticker, tui).await?;

    let tables = scraper.fetch_all(categories, view.update).await?;
    print_tables(&scraper, &tables, view.last);

    info!("{} tables fetched, time elapsed: {:?}", tables.len(), time.elapsed());
    Ok(())
}

/// Fetch and print the financial statements.
pub(crate) async fn statements(
    config: &Config,
    ticker: &TickerArgs,
    view: &ViewArgs,
    tui: bool,
) -> anyhow::Result<()> {
    let scraper = scraper(config, ticker, tui).await?;
    let tables = scraper.financial_statements(view.update).await?;
    print_tables(&scraper, &tables, view.last);
    Ok(())
}

/// Fetch and print the ratio tables.
pub(crate) async fn ratios(
    config: &Config,
    ticker: &TickerArgs,
    view: &ViewArgs,
    tui: bool,
) -> anyhow::Result<()> {
    let scraper = scraper(config, ticker, tui).await?;
    let tables = scraper.ratios(view.update).await?;
    print_tables(&scraper, &tables, view.last);
    Ok(())
}

/// Print the period-over-period growth of one row.
pub(crate) async fn growth(
    config: &Config,
    ticker: &TickerArgs,
    category: Category,
    row: &str,
    update: bool,
) -> anyhow::Result<()> {
    let scraper = scraper(config, ticker, false).await?;
    let table = scraper.fetch(category, update).await?;

    let values = table
        .values(row)
        .ok_or_else(|| anyhow::anyhow!("no row {row:?} in {category}"))?;
    let growth = growth_rate(&values)
        .ok_or_else(|| anyhow::anyhow!("row {row:?} of {category} holds non-numeric values"))?;

    println!("{}", format!("[{}] {category}: {row}", scraper.ticker().symbol).bold());
    for ((period, value), change) in table.columns().iter().zip(&values).zip(growth) {
        let change = if change.is_nan() {
            "NaN".dimmed()
        } else if change < 0.0 {
            format!("{:+.2}%", change * 100.0).red()
        } else {
            format!("{:+.2}%", change * 100.0).green()
        };
        println!("{period:>8}  {:>14}  {change:>9}", value.to_string());
    }

    Ok(())
}

/// List the cache entries of a ticker.
pub(crate) async fn status(config: &Config, ticker: &TickerArgs) -> anyhow::Result<()> {
    let scraper = scraper(config, ticker, false).await?;

    println!("{}", format!("{:?}", scraper.cache().dir()).bold());
    for entry in scraper.cache().status().await? {
        match entry.modified {
            Some(modified) => println!(
                "{:>18}  {}",
                entry.category.name(),
                modified.format("%Y-%m-%d %H:%M:%S").to_string().green()
            ),
            None => println!("{:>18}  {}", entry.category.name(), "not cached".dimmed()),
        }
    }

    Ok(())
}

fn print_tables(scraper: &RoicScraper, tables: &BTreeMap<Category, Table>, last: Option<usize>) {
    for (category, table) in tables {
        let bar = "=".repeat(40);
        println!(
            "{bar}\n{:^40}\n{bar}",
            format!("{} {category}", scraper.ticker().symbol).bold()
        );
        match last {
            Some(n) => println!("{}", table.tail(n)),
            None => println!("{table}"),
        }
    }
}
