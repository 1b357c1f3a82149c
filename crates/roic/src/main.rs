mod cli;
mod run;

// remote imports
use clap::Parser;
use cli::{Cli, Commands, TraceLevel};
use roic_spider::{Category, Config};
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// preprocess the trace level
fn preprocess(trace_level: Level) -> anyhow::Result<()> {
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber)?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // set the trace level
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        })?;
    }
    trace!("command line input recorded: {cli:?}");

    // if no trace level provided, use tui
    let tui = cli.trace.is_none();

    let config = Config::from_env().await?;
    trace!("config: {config:?}");

    // read cli inputs
    match cli.command {
        // `roic get <TICKER> [-C <CATEGORY>]...`: fetch tables, all if none named
        Commands::Get {
            ticker,
            categories,
            view,
        } => {
            let categories = if categories.is_empty() {
                Category::ALL.to_vec()
            } else {
                categories
            };
            run::tables(&config, &ticker, &categories, &view, tui).await?
        }

        Commands::Statements { ticker, view } => {
            run::statements(&config, &ticker, &view, tui).await?
        }

        Commands::Ratios { ticker, view } => {
            run::ratios(&config, &ticker, &view, tui).await?
        }

        Commands::Growth {
            ticker,
            category,
            row,
            update,
        } => run::growth(&config, &ticker, category, &row, update).await?,

        Commands::Status { ticker } => run::status(&config, &ticker).await?,
    }

    Ok(())
}
