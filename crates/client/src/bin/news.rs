use clap::Parser;
use elixoids_client::{init_tracing, run_news};
use elixoids_protocol::endpoints;

/// Print the news stream of an Elixoids server.
#[derive(Debug, Parser)]
#[command(name = "elixoids-news")]
struct Args {
    /// host:port of the Elixoids server.
    #[arg(long, env = endpoints::SERVER_ENV, default_value = endpoints::DEFAULT_SERVER)]
    server: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    run_news(&endpoints::news_url(&args.server), |line| println!("{line}")).await?;
    Ok(())
}
