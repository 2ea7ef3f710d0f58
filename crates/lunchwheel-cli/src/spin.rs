//! The `spin` and `candidates` commands.

use std::f64::consts::TAU;
use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use lunchwheel_core::{AppConfig, SearchRadius};
use lunchwheel_places::KakaoLocalClient;
use lunchwheel_wheel::{drive_spin, IntervalFrames, RenderOptions, RouletteSession, WheelError};
use tokio::sync::oneshot;

use crate::locate::{choose_location, describe_universe, gather_universe};

/// Arguments of the `spin` command after defaults are applied.
#[derive(Debug)]
pub(crate) struct SpinArgs {
    pub query: String,
    pub pick: usize,
    pub radius: SearchRadius,
    pub seed: Option<u64>,
    pub svg: Option<PathBuf>,
}

/// Resolve a location, fill the wheel and spin it once.
///
/// Ctrl-C during the spin abandons it; the command then exits cleanly
/// without a winner.
///
/// # Errors
///
/// Returns an error if the location cannot be resolved, the wheel cannot be
/// filled, or the SVG file cannot be written.
pub(crate) async fn run_spin(
    config: &AppConfig,
    source: Option<&KakaoLocalClient>,
    args: &SpinArgs,
) -> anyhow::Result<()> {
    let (location, origin) = choose_location(config, source, &args.query, args.pick).await?;
    println!("searching around {}", location.name);

    let universe = gather_universe(config, source, origin, args.radius).await;
    println!("{}", describe_universe(&universe, args.radius));

    let mut session = RouletteSession::from_config(config, args.seed);
    let candidates = session.load_universe(universe)?;
    println!("{} places on the wheel", candidates.len());

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("received ctrl-c, stopping the spin");
            let _ = shutdown_tx.send(());
        }
    });

    let mut frames = IntervalFrames::new(Duration::from_millis(config.frame_interval_ms))
        .with_shutdown(shutdown_rx);
    let mut frame = 0u64;
    let result = drive_spin(&mut session, &mut frames, |rotation| {
        frame += 1;
        if frame % 6 == 0 {
            print!("\rspinning… {:>5.1}°", rotation.rem_euclid(TAU).to_degrees());
            let _ = std::io::stdout().flush();
        }
    })
    .await;
    ctrl_c.abort();
    println!();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(WheelError::Cancelled) => {
            println!("spin cancelled");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("lunch is at {}!", outcome.winner.name);
    if let Some(address) = outcome.winner.address.as_deref() {
        println!("   {address}");
    }

    if let Some(path) = &args.svg {
        let svg = session.render(&RenderOptions::default()).to_svg();
        std::fs::write(path, svg)
            .with_context(|| format!("failed to write wheel to {}", path.display()))?;
        println!("wheel saved to {}", path.display());
    }

    Ok(())
}

/// Print the pool size for a location and one sampled wheel.
///
/// # Errors
///
/// Returns an error if the location cannot be resolved or the pool is empty.
pub(crate) async fn run_candidates(
    config: &AppConfig,
    source: Option<&KakaoLocalClient>,
    query: &str,
    pick: usize,
    radius: SearchRadius,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let (location, origin) = choose_location(config, source, query, pick).await?;
    let universe = gather_universe(config, source, origin, radius).await;
    println!("{}: {}", location.name, describe_universe(&universe, radius));

    let mut session = RouletteSession::from_config(config, seed);
    let candidates = session.load_universe(universe)?;
    for (i, place) in candidates.iter().enumerate() {
        println!("{:>3}. {}", i + 1, place.name);
    }
    Ok(())
}
