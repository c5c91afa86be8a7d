mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::process;

use commands::loan::LoanArgs;

/// Annuity and differentiated loan repayment calculator
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Annuity and differentiated loan repayment calculator",
    long_about = "Calculates loan repayments with decimal precision. With --type annuity, \
                  give any two of --payment, --principal and --periods together with \
                  --interest and the missing one is calculated. With --type diff, give \
                  --principal, --periods and --interest to get the monthly schedule."
)]
struct Cli {
    #[command(flatten)]
    loan: LoanArgs,

    /// Output format
    #[arg(long, default_value = "text")]
    output: OutputFormat,

    /// Log to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("logger already initialised: {}", e);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match commands::loan::run_loan(cli.loan) {
        Ok(result) => {
            output::format_output(&cli.output, &result);
            process::exit(0);
        }
        Err(e) => {
            println!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
