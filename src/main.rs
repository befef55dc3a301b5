use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error, warn};
use simplelog::{ConfigBuilder, WriteLogger};

use govote::core::config;
use govote::tui;

/// Find your polling place, ballot contests, and registration info from
/// the terminal.
#[derive(Parser, Debug)]
#[command(name = "govote", version, about)]
struct Args {
    /// Log verbosity for govote.log (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal is busy drawing the UI, so logs go to a file.
    if let Ok(file) = File::create("govote.log") {
        let log_config = ConfigBuilder::new()
            .set_time_format_rfc3339()
            .build();
        let _ = WriteLogger::init(args.log_level, log_config, file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            warn!("failed to load config, falling back to defaults: {e}");
            Default::default()
        }
    };

    let resolved = match config::resolve(&file_config) {
        Ok(r) => r,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tui::run(resolved) {
        error!("terminal error: {e}");
        eprintln!("terminal error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
