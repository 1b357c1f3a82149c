use clap::{Args, Parser, Subcommand, ValueEnum};
use roic_spider::Category;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print roic.ai tables for a ticker, from the cache where possible.
    Get {
        #[command(flatten)]
        ticker: TickerArgs,

        /// Tables to fetch.
        ///
        /// If no categories are provided, all of them are fetched.
        #[arg(short = 'C', long = "category", value_parser = parse_category)]
        categories: Vec<Category>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Print the income statement, balance sheet and cash flow.
    Statements {
        #[command(flatten)]
        ticker: TickerArgs,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Print the seven ratio tables.
    Ratios {
        #[command(flatten)]
        ticker: TickerArgs,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Period-over-period growth of one row of a table.
    Growth {
        #[command(flatten)]
        ticker: TickerArgs,

        /// Table holding the row.
        #[arg(short = 'C', long, value_parser = parse_category)]
        category: Category,

        /// Row label, e.g. "Net Income".
        #[arg(short, long)]
        row: String,

        /// Scrape the table again instead of reading the cache.
        #[arg(short, long)]
        update: bool,
    },

    /// Show which tables are cached for a ticker, and when they were stored.
    Status {
        #[command(flatten)]
        ticker: TickerArgs,
    },
}

#[derive(Args, Debug)]
pub struct TickerArgs {
    /// Ticker symbol, e.g. AAPL.
    pub symbol: String,

    /// Exchange country code.
    #[arg(short, long, default_value = "US")]
    pub country: String,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Scrape the tables again instead of reading the cache.
    #[arg(short, long)]
    pub update: bool,

    /// Only print the most recent N periods.
    #[arg(short, long)]
    pub last: Option<usize>,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}

fn parse_category(name: &str) -> Result<Category, String> {
    name.parse::<Category>().map_err(|err| {
        let names: Vec<&str> = Category::ALL.iter().map(Category::name).collect();
        format!("{err}; expected one of: {}", names.join(", "))
    })
}
