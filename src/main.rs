mod render;

use std::fs::File;
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use maze_chase::{controls, Error, Game, MazeGrid, Settings};

use crate::render::{render, Renderer};

fn main() -> Result<(), Error> {
    let settings = Settings::from_env()?;
    if let Some(path) = settings.log_file.as_deref() {
        init_logging(path)?;
    }

    let maze = MazeGrid::load(settings.layout.as_deref())?;
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(maze, rng)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut game, &settings);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    info!(ticks = game.ticks(), "session ended");
    result
}

/// The terminal is in raw mode while the game runs, so logs only ever go to
/// a file.
fn init_logging(path: &Path) -> Result<(), Error> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run<R: Rng>(stdout: &mut Stdout, game: &mut Game<R>, settings: &Settings) -> Result<(), Error> {
    let tick_period = Duration::from_millis(settings.tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / settings.render_fps.max(1));
    let mut renderer = Renderer::new(game.maze().width(), game.maze().height());
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                    KeyCode::Char(c) => {
                        if let Some((player, direction)) = controls::binding(c) {
                            game.steer(player, direction);
                        }
                    }
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_period {
            last_tick = Instant::now();
            game.tick();
        }
        render(stdout, game, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
