use anyhow::Result;
use clap::Parser;
use jamlink_relay::{RelayService, app};
use std::net::SocketAddr;
use tracing::{Level, info};

/// Room-scoped signaling relay for jamlink clients.
#[derive(Parser, Debug)]
#[command(name = "jamlink-relay")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:9090")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args = Args::parse();
    let service = RelayService::new();

    info!("relay listening on ws://{}/ws", args.listen);
    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    axum::serve(listener, app(service)).await?;
    Ok(())
}
