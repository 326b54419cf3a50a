#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = swipecell_harness::cli::run_from_env() {
        eprintln!("{error}");
        std::process::exit(swipecell_harness::cli::exit_code(&error));
    }
}
