//! Stock Assistant CLI
//!
//! Charts recent closing prices or summarises recent news for one ticker.
//!
//! # Usage
//!
//! ```bash
//! # Credential for the news task (or put it in .env)
//! export NEWS_API_KEY="your-key"
//!
//! # Fully specified
//! cargo run --bin stock-assistant -- --symbol AAPL --task 1 --period 7d
//! cargo run --bin stock-assistant -- --symbol AAPL --task 2 --days 7
//!
//! # Anything omitted is asked for interactively
//! cargo run --bin stock-assistant
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use stock_assistant::{AssistantConfig, FinancialAssistant, TaskParams, TaskSelector};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stock-assistant")]
#[command(about = "Chart prices or report recent news for a ticker symbol", long_about = None)]
struct Args {
    /// Ticker symbol, e.g. AAPL
    #[arg(short, long)]
    symbol: Option<String>,

    /// Task: 1 = stock data chart, 2 = financial news
    #[arg(short, long)]
    task: Option<String>,

    /// History period for the chart, e.g. 7d or 1mo
    #[arg(short, long)]
    period: Option<String>,

    /// Number of past days of news
    #[arg(short, long)]
    days: Option<String>,
}

/// Print `message` and read one line from stdin, without the line ending
fn prompt(message: &str) -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{message}")?;
    stdout.flush()?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        anyhow::bail!("stdin closed before input was given");
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn value_or_prompt(value: Option<String>, message: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => prompt(message),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    agent_utils::load_env();
    agent_utils::init_tracing_with_default("warn,stock_assistant=info");

    let args = Args::parse();

    let symbol = value_or_prompt(args.symbol, "Enter ticker symbol in capital: ")?;
    let task = value_or_prompt(
        args.task,
        "Choose task: [1] Stock Data, [2] Financial News: ",
    )?;
    let selector = TaskSelector::from_input(&task);

    let params = match selector {
        TaskSelector::MarketData => TaskParams::market_data(value_or_prompt(
            args.period,
            "Enter time period in days (Eg.- 7d): ",
        )?),
        TaskSelector::News => TaskParams::news(value_or_prompt(
            args.days,
            "Enter the number of past days to fetch news: ",
        )?),
        TaskSelector::Invalid => TaskParams::default(),
    };

    let config = AssistantConfig::from_env()?;
    let assistant = FinancialAssistant::from_config(&config, selector)?;

    info!("Running {:?} for {}", selector, symbol);
    let state = assistant.run(symbol, selector, params).await?;

    if let Some(result) = state.into_result() {
        println!("{result}");
    }

    Ok(())
}
