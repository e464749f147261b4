mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{BatchArgs, LoanArgs};

/// Loan installment and default-risk prediction
#[derive(Parser)]
#[command(
    name = "loan-predict",
    version,
    about = "Loan installment and default-risk prediction",
    long_about = "Estimates the level monthly installment of a fixed-rate loan and \
                  assigns a Low/Medium/High default-risk category from the credit \
                  score, principal and annual rate. All arithmetic is decimal."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the monthly installment and risk category
    Predict(LoanArgs),
    /// Month-by-month amortization schedule
    Schedule(LoanArgs),
    /// Predict every request in a JSON/YAML array
    Batch(BatchArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Predict(args) => commands::loan::run_predict(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Batch(args) => commands::loan::run_batch(args),
        Commands::Version => {
            println!("loan-predict {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
