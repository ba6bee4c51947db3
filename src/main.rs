// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and colors
// 3. Hand off to app::run, which does the checks and reporting
// 4. Exit with the code it returns (0 = run completed, 1 = could not read input)
// =============================================================================

use clap::Parser; // Parser trait enables the parse() method

use url_sentinel::cli::Cli;
use url_sentinel::{app, logging};

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, !cli.no_color);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let exit_code = app::run(&cli, &mut std::io::stdout(), &mut std::io::stderr()).await;

    std::process::exit(exit_code);
}
