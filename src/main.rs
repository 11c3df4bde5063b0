use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use self::config::load_config;
use self::errors::LedgerError;
use self::expenses::ExpenseLedger;
use self::logging::init_logging;
use self::tui::screen::ExpenseScreen;
use self::tui::theme::Theme;

mod config;
pub mod errors;
mod expenses;
mod format;
mod logging;
mod parse;
mod tui;

#[derive(Parser, Debug)]
#[command(version, about = "Keep a running log of your expenses", long_about = None)]
struct Args {
    /// Config file to use instead of the default locations
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Start in dark mode
    #[arg(long)]
    dark: bool,
    /// Log the final ledger when the app closes
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), LedgerError> {
    let args = Args::parse();
    let (config, source) = load_config(args.config.as_deref())?;
    init_logging(&config.log_path())?;

    match &source {
        Some(path) => info!(path = %path.display(), "config loaded"),
        None => info!("no config file found, using defaults"),
    }

    let ledger = ExpenseLedger::with_decimal_separator(config.decimal_sep);
    let theme = Theme::from_dark_mode(args.dark || config.dark_mode);
    let mut screen = ExpenseScreen::new(ledger, theme, config.currency);

    tui::open_widget(&mut screen)?;

    let ledger = screen.into_ledger();
    if args.debug {
        for record in ledger.records() {
            info!(%record, created_at = %record.created_at(), "final record");
        }
        info!(
            records = ledger.records().len(),
            total = %ledger.total(),
            "=== Expenses After ==="
        );
    }
    info!("session closed");
    Ok(())
}
