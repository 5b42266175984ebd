//! Yo client TUI entry point.

use clap::Parser;
use yowire_tui::runtime::Runtime;

/// Yo terminal client
#[derive(Parser, Debug)]
#[command(name = "yowire-tui")]
#[command(about = "Terminal UI for the Yo broadcast protocol")]
#[command(version)]
struct Args {
    /// Server address to connect to
    ///
    /// If not provided, runs in simulation mode with an in-process server.
    #[arg(short, long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Diagnostics stay off unless RUST_LOG asks for them; the terminal
    // belongs to the TUI.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let runtime = match args.server {
        Some(addr) => Runtime::with_server(addr)?,
        None => Runtime::simulated().await?,
    };

    Ok(runtime.run().await?)
}
