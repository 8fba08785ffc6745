use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use maze_chase::{Cell as MazeCell, CellPos, Game, Maze, Strategy, PLAYER_ONE, PLAYER_TWO};

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    PlayerOne,
    PlayerTwo,
    Pursuer,
    Wanderer,
    Wall,
    Empty,
    Dot,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

/// Redraws only the terminal cells that changed since the last frame.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![BLANK; width * height],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

pub fn render<R>(stdout: &mut Stdout, game: &Game<R>, renderer: &mut Renderer) -> io::Result<()> {
    let maze = game.maze();
    let (width, height) = (maze.width(), maze.height());
    let needed_h = (height + 2) as u16;
    let needed_w = (width * CELL_W) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    let hud = format!(
        "P1: {}  P2: {}  Dots: {}  (WASD / IJKL, q to quit)",
        game.score(PLAYER_ONE),
        game.score(PLAYER_TWO),
        maze.dots_remaining()
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    let frame = compose(game);
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let cell = frame[idx];
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

/// Maze first, then adversaries, then players on top.
fn compose<R>(game: &Game<R>) -> Vec<Cell> {
    let maze = game.maze();
    let width = maze.width();
    let mut frame = Vec::with_capacity(width * maze.height());
    for row in 0..maze.height() {
        for col in 0..width {
            frame.push(match maze.cell(CellPos::new(row, col)) {
                MazeCell::Wall => Cell {
                    glyph: Glyph::Wall,
                    color: Color::Blue,
                },
                MazeCell::Dot => Cell {
                    glyph: Glyph::Dot,
                    color: Color::White,
                },
                MazeCell::Open => BLANK,
            });
        }
    }

    for adversary in game.adversaries() {
        if !maze.contains(adversary.position()) {
            continue;
        }
        let pos = maze.pixel_to_cell(adversary.position());
        frame[pos.row * width + pos.col] = match adversary.strategy() {
            Strategy::Pursuit => Cell {
                glyph: Glyph::Pursuer,
                color: Color::Red,
            },
            Strategy::Wander => Cell {
                glyph: Glyph::Wanderer,
                color: Color::Cyan,
            },
        };
    }

    for (idx, agent) in game.agents().iter().enumerate() {
        let pos = maze.pixel_to_cell(agent.position());
        let glyph = if idx == PLAYER_TWO.0 {
            Glyph::PlayerTwo
        } else {
            Glyph::PlayerOne
        };
        let color = if agent.movement().is_boosted() {
            Color::Magenta
        } else if idx == PLAYER_ONE.0 {
            Color::Yellow
        } else {
            Color::Green
        };
        frame[pos.row * width + pos.col] = Cell { glyph, color };
    }
    frame
}

fn draw_cell(stdout: &mut Stdout, renderer: &Renderer, x: usize, y: usize, cell: Cell) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::PlayerOne => "😃",
        Glyph::PlayerTwo => "😎",
        Glyph::Pursuer => "👻",
        Glyph::Wanderer => "👾",
        Glyph::Wall => "██",
        Glyph::Empty => "  ",
        Glyph::Dot => "· ",
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}
