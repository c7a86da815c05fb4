//! Student Records - interactive student record manager
//!
//! Menu-driven CRUD over a comma-separated text file.

use student_records::cli;

fn main() -> anyhow::Result<()> {
    // Initialize logging (WARN level by default, use RUST_LOG=debug for more).
    // Logs go to stderr so they never mix with menu output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into())
        )
        .with_writer(std::io::stderr)
        .init();

    cli::run()
}
