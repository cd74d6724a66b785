//! `vdc`: Visa Developer Center command-line client.

use clap::Parser;
use vdc_sdk::cli::{self, Cli};

fn main() {
    // Credentials and defaults may come from a local .env file.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli::init_tracing(cli.log_verbosity, cli.json_logs);

    tracing::debug!("vdc starting");

    std::process::exit(cli::run(cli));
}
