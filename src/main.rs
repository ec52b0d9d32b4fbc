//! Terminal well runner (default binary).
//!
//! Usage: `tui-well [CONFIG.json]`
//!
//! The optional JSON file overrides any of the `WellConfig` timing fields.
//! Set `TUI_WELL_LOG=<file>` to write logs there (level from
//! `TUI_WELL_LOG_LEVEL`, default `debug`); the terminal itself is never
//! logged to.

use std::fs::File;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use tui_well::core::{Session, WellConfig};
use tui_well::input::{should_quit, KeyTracker};
use tui_well::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_well::types::FRAME_MS;

fn main() -> Result<()> {
    init_logging()?;
    let config = load_config()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("TUI_WELL_LOG") else {
        return Ok(());
    };

    let level = match std::env::var("TUI_WELL_LOG_LEVEL") {
        Ok(name) => Level::from_str(&name)
            .map_err(|_| anyhow::anyhow!("invalid TUI_WELL_LOG_LEVEL {name:?}"))?,
        Err(_) => Level::DEBUG,
    };
    let file = File::create(&path).with_context(|| format!("failed to create log file {path}"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
    Ok(())
}

fn load_config() -> Result<WellConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(WellConfig::default());
    };

    let text =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read config {path}"))?;
    let config: WellConfig =
        serde_json::from_str(&text).with_context(|| format!("invalid config {path}"))?;
    Ok(config)
}

fn run(term: &mut TerminalRenderer, config: WellConfig) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(1);
    info!(seed, ?config, "starting session");

    let mut session = Session::new(config, seed);
    session.start();

    let view = GameView::default();
    let mut keys = KeyTracker::new();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(FRAME_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&session, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(pieces = session.pieces_spawned(), "quit");
                        return Ok(());
                    }
                    keys.handle_key_event(key);
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let events = keys.update(FRAME_MS);
            session.tick(&events, FRAME_MS);
        }
    }
}
