use std::cell::Cell;
use std::rc::Rc;

use rand::Rng;
use tracing::{info, trace};

use crate::adversary::Adversary;
use crate::agent::{Agent, AgentId, AGENT_SPEED};
use crate::direction::Direction;
use crate::error::LayoutError;
use crate::geometry::{CellPos, Point};
use crate::maze::{Cell as MazeCell, MazeGrid};
use crate::strategy::Strategy;

pub const PLAYER_ONE: AgentId = AgentId(0);
pub const PLAYER_TWO: AgentId = AgentId(1);

/// Whole simulation state. Everything is mutated from `tick` only.
pub struct Game<R> {
    maze: MazeGrid,
    agents: Vec<Agent>,
    adversaries: Vec<Adversary>,
    scores: Vec<Rc<Cell<u32>>>,
    rng: R,
    ticks: u64,
}

impl<R: Rng> Game<R> {
    /// Two players in opposite corners, one pursuer tracking both and one
    /// wanderer, both adversaries starting at the canvas center.
    pub fn new(maze: MazeGrid, rng: R) -> Result<Self, LayoutError> {
        let last = CellPos::new(
            maze.height().saturating_sub(2),
            maze.width().saturating_sub(2),
        );
        let (w, h) = maze.canvas_size();
        let center = Point::new(w / 2.0, h / 2.0);

        let mut game = Game::empty(maze, rng);
        let p1 = game.spawn_agent(CellPos::new(1, 1))?;
        let p2 = game.spawn_agent(last)?;
        let pursuer = game.spawn_adversary(center, Strategy::Pursuit);
        game.adversaries[pursuer].track(p1);
        game.adversaries[pursuer].track(p2);
        game.spawn_adversary(center, Strategy::Wander);

        info!(
            width = game.maze.width(),
            height = game.maze.height(),
            dots = game.maze.dots_remaining(),
            "game started"
        );
        Ok(game)
    }

    /// One simulation period: agents first, then adversaries, each in spawn
    /// order.
    pub fn tick(&mut self) {
        for agent in self.agents.iter_mut() {
            agent.tick(&mut self.maze, &mut self.rng);
        }
        for adversary in self.adversaries.iter_mut() {
            adversary.tick(&self.agents, &mut self.rng);
        }
        self.ticks += 1;
        trace!(tick = self.ticks, "tick");
    }
}

impl<R> Game<R> {
    pub fn empty(maze: MazeGrid, rng: R) -> Self {
        Self {
            maze,
            agents: Vec::new(),
            adversaries: Vec::new(),
            scores: Vec::new(),
            rng,
            ticks: 0,
        }
    }

    /// Adds a player agent at the center of `cell`, with a score counter
    /// fed by its pickups.
    pub fn spawn_agent(&mut self, cell: CellPos) -> Result<AgentId, LayoutError> {
        if cell.row >= self.maze.height()
            || cell.col >= self.maze.width()
            || self.maze.cell(cell) == MazeCell::Wall
        {
            return Err(LayoutError::BlockedSpawn {
                row: cell.row,
                col: cell.col,
            });
        }
        let id = AgentId(self.agents.len());
        let mut agent = Agent::spawn(&self.maze, cell, AGENT_SPEED);
        let score = Rc::new(Cell::new(0));
        let counter = Rc::clone(&score);
        agent.register_pickup_observer(move |_| counter.set(counter.get() + 1));
        self.agents.push(agent);
        self.scores.push(score);
        Ok(id)
    }

    pub fn spawn_adversary(&mut self, position: Point, strategy: Strategy) -> usize {
        self.adversaries.push(Adversary::new(position, strategy));
        self.adversaries.len() - 1
    }

    /// Unknown ids are ignored.
    pub fn steer(&mut self, player: AgentId, direction: Direction) {
        if let Some(agent) = self.agents.get_mut(player.0) {
            agent.set_pending_direction(direction);
        }
    }

    pub fn score(&self, player: AgentId) -> u32 {
        self.scores.get(player.0).map_or(0, |s| s.get())
    }

    pub fn agent_mut(&mut self, player: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(player.0)
    }

    pub fn adversary_mut(&mut self, index: usize) -> Option<&mut Adversary> {
        self.adversaries.get_mut(index)
    }

    pub fn maze(&self) -> &MazeGrid {
        &self.maze
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn adversaries(&self) -> &[Adversary] {
        &self.adversaries
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
