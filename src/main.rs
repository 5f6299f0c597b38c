pub mod app;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod dns;
pub mod fs;
pub mod http;
pub mod log;
pub mod output;
pub mod pool;
pub mod source;
pub mod time;

use clap::Parser;

use cli::Cli;
use config::EnumSettings;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = log::init_logger(&cli) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    // Resolver address and port are checked before any file or network access
    let settings = match EnumSettings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => exit_with_error(&e.to_string()),
    };
    if !cli.quiet {
        app::show_banner_with_starttime();
    }
    match cmd::run(&settings).await {
        Ok(result) => {
            tracing::debug!("{} run finished with {} result(s)", result.mode, result.discovered);
        }
        Err(e) => exit_with_error(&format!("{:#}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!();
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
