pub mod adversary;
pub mod agent;
pub mod config;
pub mod controls;
pub mod direction;
pub mod error;
pub mod game;
pub mod geometry;
pub mod maze;
pub mod movement;
pub mod strategy;

pub use adversary::Adversary;
pub use agent::{Agent, AgentId, Pickup};
pub use config::Settings;
pub use direction::Direction;
pub use error::{ConfigError, Error, LayoutError, Result};
pub use game::{Game, PLAYER_ONE, PLAYER_TWO};
pub use geometry::{CellPos, Point};
pub use maze::{Cell, Maze, MazeGrid};
pub use movement::MovementState;
pub use strategy::Strategy;
