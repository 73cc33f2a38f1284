mod display;
mod input;

use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, LevelFilter};

use alien_invasion::game::{AlienInvasion, Flow, FRAME_RATE};
use alien_invasion::settings::Settings;

use display::Viewport;
use input::InputTranslator;

const FRAME: Duration = Duration::from_micros(1_000_000 / FRAME_RATE as u64);

/// Terminal version of Alien Invasion.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Width of the playfield in world units.
    #[arg(
        long,
        default_value_t = Settings::default().screen_width,
        value_parser = clap::value_parser!(i32).range(1..)
    )]
    width: i32,

    /// Height of the playfield in world units.
    #[arg(
        long,
        default_value_t = Settings::default().screen_height,
        value_parser = clap::value_parser!(i32).range(1..)
    )]
    height: i32,

    /// Ships per game.
    #[arg(
        long,
        default_value_t = Settings::default().ship_limit,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    ships: u32,

    /// Append log output to this file (logging is off otherwise).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Most verbose level written to the log file.
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            screen_width: self.width,
            screen_height: self.height,
            ship_limit: self.ships,
            ..Settings::default()
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Each frame: drain input, advance the
/// simulation (the controller skips this itself while inactive or paused),
/// redraw, then sleep out the rest of the frame.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut AlienInvasion,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let world = (game.settings.screen_width, game.settings.screen_height);
    let mut viewport = Viewport::new(cols, rows, world.0, world.1);
    let mut input = InputTranslator::new();
    let mut pointer_visible = true;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(cols, rows) = ev {
                viewport = Viewport::new(cols, rows, world.0, world.1);
                continue;
            }
            if let Some(game_event) = input.translate(ev, frame, &viewport) {
                if game.handle_event(game_event) == Flow::Quit {
                    info!("quit requested");
                    return Ok(());
                }
            }
        }
        for game_event in input.expire(frame) {
            game.handle_event(game_event);
        }

        game.update();

        if game.pointer_visible != pointer_visible {
            pointer_visible = game.pointer_visible;
            if pointer_visible {
                out.execute(cursor::Show)?;
            } else {
                out.execute(cursor::Hide)?;
            }
        }

        display::render(out, game, &viewport)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the renderer, so logs only ever go to a file.
    if let Some(path) = &cli.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        env_logger::Builder::new()
            .filter_level(cli.log_level)
            .write_style(env_logger::WriteStyle::Never)
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init()
            .context("Failed to install logger")?;
    }

    let mut game = AlienInvasion::new(cli.settings());
    info!(
        "starting: {}x{} world, {} ships",
        cli.width, cli.height, cli.ships
    );

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("Failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("Failed to enter alternate screen")?;
    out.execute(EnableMouseCapture)
        .context("Failed to enable mouse capture")?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut game, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    log::logger().flush();

    result.context("Game loop failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_settings() {
        let cli = Cli::try_parse_from(["alien_invasion"]).unwrap();
        let settings = cli.settings();
        assert_eq!(settings.screen_width, 1200);
        assert_eq!(settings.screen_height, 800);
        assert_eq!(settings.ship_limit, Settings::default().ship_limit);
        assert_eq!(cli.log_level, LevelFilter::Info);
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let cli = Cli::try_parse_from([
            "alien_invasion",
            "--width",
            "800",
            "--height",
            "600",
            "--ships",
            "5",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let settings = cli.settings();
        assert_eq!((settings.screen_width, settings.screen_height), (800, 600));
        assert_eq!(settings.ship_limit, 5);
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }

    #[test]
    fn zero_ships_rejected() {
        assert!(Cli::try_parse_from(["alien_invasion", "--ships", "0"]).is_err());
    }

    #[test]
    fn non_positive_playfield_rejected() {
        assert!(Cli::try_parse_from(["alien_invasion", "--width", "0"]).is_err());
        assert!(Cli::try_parse_from(["alien_invasion", "--height", "0"]).is_err());
        assert!(Cli::try_parse_from(["alien_invasion", "--width=-100"]).is_err());
        assert!(Cli::try_parse_from(["alien_invasion", "--height=-1"]).is_err());
    }
}
