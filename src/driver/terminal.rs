//! Terminal driver for the 2D automaton
//!
//! The render loop draws a frame, advances one generation and sleeps out the
//! frame delay; a dedicated input thread watches for a quit key and signals
//! the loop over a channel between generations.

use crate::automaton::{Grid2, RuleSet};
use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the simulation until a quit key (`q`, Esc or ctrl-c) arrives.
/// Returns the number of generations rendered.
pub fn run(grid: Grid2, frame_delay: Duration) -> Result<u64> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;

    let result = run_loop(&mut stdout, grid, frame_delay);

    execute!(stdout, Show, LeaveAlternateScreen).ok();
    disable_raw_mode().ok();
    result
}

fn run_loop(stdout: &mut io::Stdout, mut grid: Grid2, frame_delay: Duration) -> Result<u64> {
    let stop = Arc::new(AtomicBool::new(false));
    let (quit_tx, quit_rx) = mpsc::channel();
    let input = thread::spawn({
        let stop = Arc::clone(&stop);
        move || poll_for_quit(quit_tx, stop)
    });

    let rule = RuleSet::conway();
    let mut generations = 0u64;

    loop {
        draw(stdout, &grid)?;
        grid = grid.step(&rule);
        generations += 1;

        // Waiting on the quit channel doubles as the frame cadence
        match quit_rx.recv_timeout(frame_delay) {
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
    }

    stop.store(true, Ordering::Relaxed);
    let _ = input.join();
    Ok(generations)
}

fn poll_for_quit(quit: Sender<()>, stop: Arc<AtomicBool>) {
    while !stop.load(Ordering::Relaxed) {
        if !event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
            continue;
        }
        if let Ok(Event::Key(key)) = event::read() {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let is_quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                || (key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL));
            if is_quit {
                let _ = quit.send(());
                return;
            }
        }
    }
}

fn draw(stdout: &mut io::Stdout, grid: &Grid2) -> Result<()> {
    queue!(
        stdout,
        Clear(ClearType::All),
        SetForegroundColor(Color::Blue)
    )?;

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.get(x, y) {
                queue!(stdout, MoveTo(x as u16, y as u16), Print('█'))?;
            }
        }
    }

    stdout.flush().context("Failed to flush terminal output")?;
    Ok(())
}
