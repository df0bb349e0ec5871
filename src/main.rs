//! Booth searcher build tool.
//!
//! Installs the Python dependencies and freezes the Booth VRChat outfit
//! searcher into a standalone executable, stopping at the first failed stage.

use booth_searcher_build::cli;
use std::process;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse_args();

    // Initialize logging; RUST_LOG overrides -v
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level().as_str()),
    )
    .init();

    // Run CLI and get exit code
    let exit_code = match cli::run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
