//! Yo broadcast server entry point.

use clap::Parser;
use yowire_server::Server;

/// Yo broadcast server
#[derive(Parser, Debug)]
#[command(name = "yowire-server")]
#[command(about = "Broadcast server for the Yo wire protocol")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value = "0.0.0.0:2336")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let server = Server::bind(&args.bind).await?;
    tracing::info!("listening on {}", server.local_addr()?);

    Ok(server.run().await?)
}
