use clap::Parser;
use elixoids_client::{init_tracing, run_ship, Args, Pilot, Settings};
use elixoids_engine::{SystemClock, TargetingEngine, UniformJitter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let settings = Settings::from_args(Args::parse())?;
    let engine =
        TargetingEngine::with_sources(settings.engine, UniformJitter::from_entropy(), SystemClock)?;
    let mut pilot = Pilot::new(settings.tag.clone(), engine);

    tracing::info!(tag = %settings.tag, url = %settings.ship_url, "piloting ship");
    tokio::select! {
        res = run_ship(&settings.ship_url, &mut pilot, settings.retry) => res?,
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupted"),
    }
    Ok(())
}
