mod export;
mod loader;

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use analyzer_core::compare::compare::{best, compare, TickerSummary};
use analyzer_core::portfolio::portfolio::{Portfolio, PortfolioReport};
use analyzer_core::{AnalysisConfig, AnalysisError, AnalysisReport, Analyzer};

#[derive(Debug, Parser)]
#[command(name = "analyzer", about = "Stock price-series analysis toolkit")]
struct Cli {
    #[command(flatten)]
    params: ParamArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ParamArgs {
    /// JSON config file; a missing file means defaults
    #[arg(long, global = true, default_value = "config.json")]
    config: PathBuf,

    /// Simple moving average window
    #[arg(long, global = true)]
    sma_window: Option<usize>,

    /// RSI trailing-change window
    #[arg(long, global = true)]
    rsi_period: Option<usize>,

    /// Bollinger band window
    #[arg(long, global = true)]
    boll_period: Option<usize>,

    /// Bollinger band width in standard deviations
    #[arg(long, global = true)]
    boll_k: Option<f64>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze one ticker's CSV of daily records
    Analyze {
        /// CSV file with date and close columns
        input: PathBuf,

        /// Ticker label; defaults to the file stem
        #[arg(long)]
        ticker: Option<String>,

        /// Write the metric table to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print the whole report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Rank several tickers against each other
    Compare {
        /// One CSV file per ticker
        inputs: Vec<PathBuf>,
    },

    /// Portfolio statistics over weighted holdings
    Portfolio {
        /// Holdings as file.csv:weight
        holdings: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = build_config(&cli.params)?;

    match cli.command {
        Command::Analyze {
            input,
            ticker,
            export,
            json,
        } => {
            let series = loader::load_series(&input)?;
            info!(records = series.len(), "loaded {}", input.display());
            let ticker = ticker.unwrap_or_else(|| loader::ticker_from_path(&input));
            let report = Analyzer::new(config.clone())?.analyze(&series)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&ticker, &report, &config);
            }
            if let Some(path) = export {
                export::export_table(&report, &path)?;
                println!("Metric table written to {}", path.display());
            }
        }
        Command::Compare { inputs } => {
            let mut series_by_ticker = Vec::with_capacity(inputs.len());
            for path in &inputs {
                let series = loader::load_series(path)?;
                info!(records = series.len(), "loaded {}", path.display());
                series_by_ticker.push((loader::ticker_from_path(path), series));
            }
            let ranked = compare(&series_by_ticker, &config)?;
            print_comparison(&ranked);
        }
        Command::Portfolio { holdings } => {
            let mut portfolio = Portfolio::new();
            let mut data = HashMap::new();
            for entry in &holdings {
                let (path, weight) = parse_holding(entry)?;
                let ticker = loader::ticker_from_path(&path);
                data.insert(ticker.clone(), loader::load_series(&path)?);
                portfolio.add_holding(ticker, weight)?;
            }
            let report = portfolio.analyze(&data)?;
            print_portfolio(&portfolio, &report);
        }
    }

    Ok(())
}

fn build_config(params: &ParamArgs) -> Result<AnalysisConfig, AnalysisError> {
    let mut config = AnalysisConfig::from_file(&params.config)?;
    if let Some(w) = params.sma_window {
        config.sma_window = w;
    }
    if let Some(p) = params.rsi_period {
        config.rsi_period = p;
    }
    if let Some(p) = params.boll_period {
        config.boll_period = p;
    }
    if let Some(k) = params.boll_k {
        config.boll_k = k;
    }
    config.validate()?;
    Ok(config)
}

fn parse_holding(entry: &str) -> Result<(PathBuf, f64), AnalysisError> {
    let (path, weight) = entry.rsplit_once(':').ok_or_else(|| {
        AnalysisError::SourceFormat(format!("holding {:?} is not file.csv:weight", entry))
    })?;
    let weight: f64 = weight.parse().map_err(|_| {
        AnalysisError::SourceFormat(format!("holding {:?} has a bad weight", entry))
    })?;
    Ok((Path::new(path).to_path_buf(), weight))
}

fn print_report(ticker: &str, report: &AnalysisReport, config: &AnalysisConfig) {
    println!("Analysis for {}", ticker);
    if report.is_empty() {
        println!("  (no records)");
        return;
    }
    println!(
        "  {} records, {} to {}",
        report.len(),
        report.dates.first().unwrap(),
        report.dates.last().unwrap()
    );
    println!("  Max profit (unlimited transactions): {:.2}", report.max_profit);
    println!(
        "  Up steps: {}, down steps: {}",
        report.runs.up_steps, report.runs.down_steps
    );
    if let Some(run) = report.runs.longest_up() {
        println!(
            "  Longest up-run:   {} to {} ({} days, {:+.2})",
            report.dates[run.start],
            report.dates[run.end],
            run.len(),
            run.magnitude
        );
    }
    if let Some(run) = report.runs.longest_down() {
        println!(
            "  Longest down-run: {} to {} ({} days, {:+.2})",
            report.dates[run.start],
            report.dates[run.end],
            run.len(),
            run.magnitude
        );
    }

    let highlights: Vec<_> = report
        .runs
        .runs
        .iter()
        .filter(|r| r.len() >= config.min_run_len)
        .collect();
    if !highlights.is_empty() {
        println!("\nRuns of {} days or more:", config.min_run_len);
        for run in highlights {
            println!(
                "  {:<4} {} to {} ({} days, {:+.2})",
                run.direction.to_string(),
                report.dates[run.start],
                report.dates[run.end],
                run.len(),
                run.magnitude
            );
        }
    }

    println!(
        "\n{:<12} {:>10} {:>10} {:>9} {:>8} {:>10} {:>10} {:>10}",
        "DATE", "CLOSE", "SMA", "RETURN%", "RSI", "BOLL_UP", "BOLL_MID", "BOLL_LOW"
    );
    for row in report.rows() {
        println!(
            "{:<12} {:>10.2} {:>10} {:>9} {:>8} {:>10} {:>10} {:>10}",
            row.date.to_str(),
            row.close,
            fmt_opt(row.sma, 2),
            fmt_opt(row.daily_return.map(|r| r * 100.0), 2),
            fmt_opt(row.rsi, 1),
            fmt_opt(row.boll_upper, 2),
            fmt_opt(row.boll_middle, 2),
            fmt_opt(row.boll_lower, 2),
        );
    }
}

fn print_comparison(ranked: &[TickerSummary]) {
    if ranked.is_empty() {
        println!("Nothing to compare.");
        return;
    }
    println!(
        "{:<8} {:>10} {:>9} {:>10} {:>7} {:<11} {:>7} {:>10} {:>9}",
        "TICKER", "LAST", "CHANGE%", "SMA", "RSI", "STATUS", "VOL%", "MAXPROFIT", "SCORE"
    );
    for s in ranked {
        println!(
            "{:<8} {:>10.2} {:>9.2} {:>10} {:>7} {:<11} {:>7} {:>10.2} {:>9.2}",
            s.ticker,
            s.current_price,
            s.total_change_pct,
            fmt_opt(s.sma_current, 2),
            fmt_opt(s.rsi_current, 1),
            s.rsi_status.to_string(),
            fmt_opt(s.volatility_pct, 2),
            s.max_profit,
            s.score,
        );
    }
    if let Some(top) = best(ranked) {
        println!("\nBest pick: {} (score {:.2})", top.ticker, top.score);
    }
}

fn print_portfolio(portfolio: &Portfolio, report: &PortfolioReport) {
    println!("Portfolio of {} holdings", portfolio.holdings().len());
    println!("  Total return:      {:>8.2}%", report.total_return * 100.0);
    println!("  Annualized return: {:>8.2}%", report.annual_return * 100.0);
    println!("  Volatility:        {:>8.2}%", report.volatility * 100.0);
    println!("  Sharpe ratio:      {:>8.2}", report.sharpe_ratio);
    println!("  Max drawdown:      {:>8.2}%", report.max_drawdown * 100.0);
    println!("  Contributions:");
    for (ticker, c) in &report.contributions {
        println!("    {:<8} {:>8.2}", ticker, c);
    }
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}
