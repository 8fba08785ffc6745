use std::fs;
use std::path::Path;

use crate::direction::Direction;
use crate::error::{Error, LayoutError};
use crate::geometry::{CellPos, Point};

pub const CELL_SIZE: f32 = 40.0;
const CENTER_TOLERANCE: f32 = 0.5;

/// 20x15 cells, 800x600 pixels at the default cell size.
pub const DEFAULT_LAYOUT: &str = "\
####################
#........##........#
#.##.###.##.###.##.#
#..................#
#.##.#.######.#.##.#
#....#...##...#....#
####.###.##.###.####
#.......    .......#
####.#.######.#.####
#....#...##...#....#
#.##.###.##.###.##.#
#..#............#..#
##.#.#.######.#.#.##
#..................#
####################
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
    Dot,
}

/// Grid queries the simulation relies on. Coordinates handed out by an
/// implementation are always inside the grid.
pub trait Maze {
    fn pixel_to_cell(&self, p: Point) -> CellPos;
    fn cell_center(&self, cell: CellPos) -> Point;
    fn is_centered(&self, p: Point) -> bool;
    fn has_dot(&self, cell: CellPos) -> bool;
    /// Returns true only when a dot was actually removed.
    fn consume_dot(&mut self, cell: CellPos) -> bool;
    fn is_open(&self, cell: CellPos, dir: Direction) -> bool;
}

#[derive(Debug, Clone)]
pub struct MazeGrid {
    width: usize,
    height: usize,
    cell_size: f32,
    grid: Vec<Vec<Cell>>,
    dots_left: usize,
}

impl MazeGrid {
    pub fn from_layout(text: &str, cell_size: f32) -> Result<Self, LayoutError> {
        let mut grid = Vec::new();
        for (row, line) in text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .enumerate()
        {
            let mut cells = Vec::new();
            for (col, glyph) in line.chars().enumerate() {
                let cell = match glyph {
                    '#' => Cell::Wall,
                    '.' => Cell::Dot,
                    ' ' => Cell::Open,
                    _ => return Err(LayoutError::UnknownGlyph { glyph, row, col }),
                };
                cells.push(cell);
            }
            if let Some(first) = grid.first().map(Vec::len) {
                if cells.len() != first {
                    return Err(LayoutError::Ragged {
                        row,
                        expected: first,
                        found: cells.len(),
                    });
                }
            }
            grid.push(cells);
        }
        if grid.is_empty() || grid[0].is_empty() {
            return Err(LayoutError::Empty);
        }

        let dots_left = grid
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == Cell::Dot)
            .count();
        Ok(Self {
            width: grid[0].len(),
            height: grid.len(),
            cell_size,
            grid,
            dots_left,
        })
    }

    /// Reads a layout file, or the built-in layout when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let Some(path) = path else {
            return Ok(MazeGrid::default());
        };
        let text = fs::read_to_string(path).map_err(|source| Error::LayoutFile {
            path: path.display().to_string(),
            source,
        })?;
        Ok(MazeGrid::from_layout(&text, CELL_SIZE)?)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        (
            self.width as f32 * self.cell_size,
            self.height as f32 * self.cell_size,
        )
    }

    pub fn cell(&self, pos: CellPos) -> Cell {
        self.grid[pos.row][pos.col]
    }

    pub fn dots_remaining(&self) -> usize {
        self.dots_left
    }

    pub fn contains(&self, p: Point) -> bool {
        let (w, h) = self.canvas_size();
        p.x >= 0.0 && p.y >= 0.0 && p.x < w && p.y < h
    }

    fn neighbor(&self, cell: CellPos, dir: Direction) -> Option<CellPos> {
        let (dx, dy) = dir.delta();
        let col = cell.col as isize + dx;
        let row = cell.row as isize + dy;
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(CellPos::new(row, col))
    }
}

impl Default for MazeGrid {
    fn default() -> Self {
        MazeGrid::from_layout(DEFAULT_LAYOUT, CELL_SIZE).expect("built-in layout is valid")
    }
}

impl Maze for MazeGrid {
    fn pixel_to_cell(&self, p: Point) -> CellPos {
        let col = (p.x / self.cell_size).floor().max(0.0) as usize;
        let row = (p.y / self.cell_size).floor().max(0.0) as usize;
        CellPos::new(row.min(self.height - 1), col.min(self.width - 1))
    }

    fn cell_center(&self, cell: CellPos) -> Point {
        Point::new(
            (cell.col as f32 + 0.5) * self.cell_size,
            (cell.row as f32 + 0.5) * self.cell_size,
        )
    }

    fn is_centered(&self, p: Point) -> bool {
        let center = self.cell_center(self.pixel_to_cell(p));
        (p.x - center.x).abs() <= CENTER_TOLERANCE && (p.y - center.y).abs() <= CENTER_TOLERANCE
    }

    fn has_dot(&self, cell: CellPos) -> bool {
        self.cell(cell) == Cell::Dot
    }

    fn consume_dot(&mut self, cell: CellPos) -> bool {
        if !self.has_dot(cell) {
            return false;
        }
        self.grid[cell.row][cell.col] = Cell::Open;
        self.dots_left = self.dots_left.saturating_sub(1);
        true
    }

    fn is_open(&self, cell: CellPos, dir: Direction) -> bool {
        match self.neighbor(cell, dir) {
            Some(next) => self.cell(next) != Cell::Wall,
            None => false,
        }
    }
}
