//! Streaming driver for the 3D automaton
//!
//! Each client gets its own freshly seeded grid. A broadcast task owns the
//! grid and writes one frame per generation; the connection's read half
//! feeds cadence updates to it through a watch channel, so the two loops
//! never share mutable state.

use crate::automaton::{io, Grid3, Pattern, RuleSet};
use crate::config::Settings;
use crate::driver::protocol;
use crate::utils::rng;
use anyhow::{Context, Result};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tracing::{info, warn};

/// Listen for clients and stream generations to each over
/// newline-delimited JSON
pub async fn serve(settings: Settings, seed: u64) -> Result<()> {
    let pattern = match &settings.server.pattern {
        Some(cfg) => Some((io::load_pattern_from_file(&cfg.file)?, cfg.offset)),
        None => None,
    };

    let listener = TcpListener::bind(&settings.server.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", settings.server.bind_address))?;
    info!(address = %settings.server.bind_address, "listening");

    let mut connections: u64 = 0;
    loop {
        let (stream, peer) = listener
            .accept()
            .await
            .context("Failed to accept connection")?;
        let connection_rng = rng::fork(seed, connections);
        connections += 1;
        info!(%peer, "client connected");

        let settings = settings.clone();
        let pattern = pattern.clone();
        tokio::spawn(async move {
            match handle_client(stream, settings, pattern, connection_rng).await {
                Ok(()) => info!(%peer, "client disconnected"),
                Err(err) => warn!(%peer, error = %err, "connection closed"),
            }
        });
    }
}

async fn handle_client(
    stream: TcpStream,
    settings: Settings,
    pattern: Option<(Pattern, [usize; 3])>,
    mut rng: ChaCha8Rng,
) -> Result<()> {
    let mut grid = Grid3::new(settings.grid3d);
    grid.randomize(&mut rng, settings.simulation.fill_density);
    if let Some((pattern, [x, y, z])) = pattern {
        grid.stamp(&pattern, x, y, z);
    }

    let (reader, writer) = stream.into_split();
    let initial = Duration::from_millis(settings.server.broadcast_interval_ms);
    let (cadence_tx, cadence_rx) = watch::channel(initial);

    let broadcast = tokio::spawn(broadcast_loop(writer, grid, cadence_rx));

    let mut lines = BufReader::new(reader).lines();
    let result = loop {
        match lines.next_line().await {
            Ok(Some(line)) => match protocol::parse_speed_update(&line) {
                Ok(cadence) => {
                    info!(cadence_ms = cadence.as_millis() as u64, "cadence updated");
                    if cadence_tx.send(cadence).is_err() {
                        break Ok(());
                    }
                }
                Err(err) => break Err(err.into()),
            },
            Ok(None) => break Ok(()),
            Err(err) => {
                break Err(anyhow::Error::new(err).context("Failed to read client message"))
            }
        }
    };

    broadcast.abort();
    result
}

/// Owns the grid: write a frame, advance a generation, sleep out the cadence
async fn broadcast_loop(
    mut writer: OwnedWriteHalf,
    mut grid: Grid3,
    cadence: watch::Receiver<Duration>,
) {
    let rule = RuleSet::life_3d();
    loop {
        let frame = match protocol::encode_frame(&grid) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(error = %err, "failed to encode frame");
                return;
            }
        };

        if writer.write_all(frame.as_bytes()).await.is_err()
            || writer.write_all(b"\n").await.is_err()
        {
            // Client gone; the read half sees EOF and tears the connection down
            return;
        }

        grid = grid.step(&rule);

        let delay = *cadence.borrow();
        tokio::time::sleep(delay).await;
    }
}
