//! # Floorplan
//!
//! Command-line floor plan designer.

use clap::Parser;
use floorplan_cli::{CliArgs, CliConfig, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("floorplan_cli=info,floorplan_core=info,floorplan_renderer=info")
    });

    // Logs go to stderr so reports on stdout stay clean.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // Use JSON format when RUST_LOG_FORMAT=json
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = CliConfig::from(args);
    tracing::debug!("config: {config:?}");

    let mut session = Session::new()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    session.run(&config, &mut out)?;
    Ok(())
}
