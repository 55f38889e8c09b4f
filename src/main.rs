use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use serde::Serialize;

use expedition_summit_trends::aggregate::BUCKET_KINDS;
use expedition_summit_trends::{
    aggregate, load_records, summarize_rates, IngestOptions, MonthlyBucket, YearRange, YearlyRate,
};

#[derive(Parser)]
#[command(name = "summit-trends")]
#[command(about = "Monthly summit/death series and yearly rates for expedition records", long_about = None)]
struct Cli {
    /// Delimited expedition table with a header row
    #[arg(long, env = "SUMMIT_TRENDS_INPUT", global = true)]
    input: Option<PathBuf>,
    /// Single-byte field delimiter
    #[arg(long, default_value_t = ',', global = true)]
    delimiter: char,
    /// Drop records summited before this year
    #[arg(long, global = true)]
    from_year: Option<i32>,
    /// Drop records summited after this year
    #[arg(long, global = true)]
    to_year: Option<i32>,
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Dense monthly summit and death counts
    Monthly {
        /// Only print this year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Yearly summit success and death rates
    Rates,
    /// Monthly series and yearly rates together
    Summary,
}

#[derive(Serialize)]
struct Summary<'a> {
    monthly: &'a [MonthlyBucket],
    rates: &'a [YearlyRate],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let input = cli
        .input
        .context("an input table is required (--input or SUMMIT_TRENDS_INPUT)")?;
    let delimiter = u8::try_from(cli.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .context("delimiter must be a single ASCII character")?;

    let report = load_records(&input, IngestOptions { delimiter })
        .with_context(|| format!("failed to load {}", input.display()))?;
    if report.rows_without_date > 0 {
        log::info!(
            "{} of {} rows have no usable summit date and are excluded",
            report.rows_without_date,
            report.rows_read
        );
    }

    let range = YearRange::new(cli.from_year, cli.to_year);
    let records = if range.is_unbounded() {
        report.records
    } else {
        range.apply(&report.records)
    };

    match cli.command {
        Commands::Monthly { year } => {
            let mut buckets = aggregate(&records);
            if let Some(year) = year {
                buckets.retain(|b| b.year == year);
            }
            match cli.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&buckets)?),
                Format::Text => print_monthly(&buckets),
            }
        }
        Commands::Rates => {
            let rates = summarize_rates(&records);
            match cli.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&rates)?),
                Format::Text => print_rates(&rates),
            }
        }
        Commands::Summary => {
            let buckets = aggregate(&records);
            let rates = summarize_rates(&records);
            match cli.format {
                Format::Json => {
                    let summary = Summary {
                        monthly: &buckets,
                        rates: &rates,
                    };
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                }
                Format::Text => {
                    print_monthly(&buckets);
                    println!();
                    print_rates(&rates);
                }
            }
        }
    }

    Ok(())
}

fn print_monthly(buckets: &[MonthlyBucket]) {
    if buckets.is_empty() {
        println!("No dated expeditions found.");
        return;
    }

    let header: Vec<String> = BUCKET_KINDS
        .iter()
        .map(|(category, metric)| format!("{category}_{metric}"))
        .collect();
    println!("{:<8} {}", "month", header.join(" "));

    // rows arrive sorted with the six kinds of a month adjacent
    for month in buckets.chunks(BUCKET_KINDS.len()) {
        let first = &month[0];
        let counts: Vec<String> = month
            .iter()
            .zip(header.iter())
            .map(|(bucket, label)| format!("{:>width$}", bucket.count, width = label.len()))
            .collect();
        println!("{}-{:02}  {}", first.year, first.month, counts.join(" "));
    }
}

fn print_rates(rates: &[YearlyRate]) {
    if rates.is_empty() {
        println!("No dated expeditions found.");
        return;
    }

    println!("{:<6} {:>12} {:>12}", "year", "summit_rate", "death_rate");
    for rate in rates {
        println!(
            "{:<6} {:>12} {:>12}",
            rate.year,
            format_rate(rate.summit_rate),
            format_rate(rate.death_rate)
        );
    }
}

fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(value) => format!("{value:.4}"),
        None => "undefined".to_string(),
    }
}
