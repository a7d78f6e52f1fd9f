mod app;
mod domain;
mod error;
mod input;
mod logging;
mod persistence;
mod report;
mod ticker;
mod timer;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use chrono::Utc;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{format_currency, Configuration};
use persistence::{ensure_data_dir, init_local_data_dir, save_config, FileStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser)]
#[command(name = "pausepay")]
#[command(
    about = "See how much your breaks are worth: a break stopwatch priced by your salary",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .pausepay directory in the current directory
    Init,
    /// Set monthly salary and working hours per day
    Config {
        /// Monthly salary, e.g. 3500 or 3500,00
        #[arg(short, long)]
        salary: String,
        /// Working hours per day, up to 24
        #[arg(long)]
        hours: String,
    },
    /// Generate a daily report with break statistics
    Report {
        /// Date to generate report for (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        /// Output file path. Defaults to <data dir>/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_data_dir()?;
            println!("Initialized pausepay directory: {}", data_dir.display());
            println!();
            println!("PausePay will now keep its data in this local directory.");
            println!("Run 'pausepay' to start timing your breaks.");
            Ok(())
        }
        Some(Commands::Config { salary, hours }) => {
            let (store, _guard) = open_store()?;
            let config = Configuration::from_input(&salary, &hours)?;
            save_config(store.as_ref(), &config).context("Failed to save configuration")?;

            let rates = config.rates()?;
            println!("Saved. Your break hour is worth {}.", format_currency(rates.hourly));
            Ok(())
        }
        Some(Commands::Report { date, output }) => {
            let (store, _guard) = open_store()?;
            let report_date = match date {
                Some(date_str) => Some(
                    chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                        anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e)
                    })?,
                ),
                None => None,
            };

            let output_path = output.map(std::path::PathBuf::from);
            let report_path = report::generate_report(store, report_date, output_path)?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
        None => run_tui(),
    }
}

/// Resolve the data directory, start file logging and open the store
fn open_store() -> Result<(Arc<FileStore>, WorkerGuard)> {
    let data_dir = ensure_data_dir()?;
    let guard = logging::init_logging(&data_dir)?;
    info!(dir = %data_dir.display(), "using data directory");
    Ok((Arc::new(FileStore::new(&data_dir)), guard))
}

fn run_tui() -> Result<()> {
    let (store, _guard) = open_store()?;
    let mut app = AppState::new(store, Utc::now());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if app.timer.is_running() {
        info!("exiting with a break in progress; it resumes on next start");
    }

    if let Err(err) = result {
        error!("terminal loop failed: {:#}", err);
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Only a running break needs the clock to advance on its own
        let input_ready = match ticker::tick_interval(app.timer.status()) {
            Some(timeout) => event::poll(timeout)?,
            None => true,
        };

        if input_ready {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key, Utc::now())? {
                    return Ok(());
                }
            }
        }

        app.tick(Utc::now());
    }
}
