use std::fmt;

use rand::Rng;
use tracing::debug;

use crate::direction::Direction;
use crate::geometry::{CellPos, Point};
use crate::maze::Maze;
use crate::movement::MovementState;

pub const AGENT_SPEED: f32 = 5.0;

/// Index of an agent inside a `Game`, in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentId(pub usize);

/// Delivered to pickup observers when an agent eats a dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    pub cell: CellPos,
}

pub type PickupObserver = Box<dyn FnMut(Pickup)>;

/// Player-controlled agent. Direction changes and pickups only happen while
/// the agent sits on a cell center.
pub struct Agent {
    position: Point,
    direction: Direction,
    pending: Direction,
    state: MovementState,
    base_speed: f32,
    observers: Vec<PickupObserver>,
}

impl Agent {
    pub fn spawn<M: Maze + ?Sized>(maze: &M, cell: CellPos, base_speed: f32) -> Self {
        Self {
            position: maze.cell_center(cell),
            direction: Direction::Still,
            pending: Direction::Still,
            state: MovementState::Normal,
            base_speed,
            observers: Vec::new(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn movement(&self) -> MovementState {
        self.state
    }

    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.pending = direction;
    }

    /// Observers run synchronously, in registration order.
    pub fn register_pickup_observer(&mut self, observer: impl FnMut(Pickup) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn tick<M, R>(&mut self, maze: &mut M, rng: &mut R)
    where
        M: Maze + ?Sized,
        R: Rng + ?Sized,
    {
        if maze.is_centered(self.position) {
            let cell = maze.pixel_to_cell(self.position);

            if maze.has_dot(cell) && maze.consume_dot(cell) {
                debug!(row = cell.row, col = cell.col, "dot eaten");
                let pickup = Pickup { cell };
                for observer in self.observers.iter_mut() {
                    observer(pickup);
                }
                self.state = self.state.upgrade(rng);
            }

            self.direction = if maze.is_open(cell, self.pending) {
                self.pending
            } else {
                Direction::Still
            };
        }

        self.state = self
            .state
            .apply_displacement(&mut self.position, self.direction, self.base_speed);
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("position", &self.position)
            .field("direction", &self.direction)
            .field("pending", &self.pending)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell as Counter;
    use std::rc::Rc;

    use rand::rngs::mock::StepRng;

    use super::*;
    use crate::maze::{MazeGrid, CELL_SIZE};

    // Corridor along row 1, one branch down from column 2.
    const CORRIDOR: &str = "\
######
#....#
##.###
######
";

    fn corridor() -> MazeGrid {
        MazeGrid::from_layout(CORRIDOR, CELL_SIZE).unwrap()
    }

    fn no_boost() -> StepRng {
        StepRng::new(1 << 63, 0)
    }

    fn counting(agent: &mut Agent) -> Rc<Counter<u32>> {
        let count = Rc::new(Counter::new(0));
        let seen = Rc::clone(&count);
        agent.register_pickup_observer(move |_| seen.set(seen.get() + 1));
        count
    }

    #[test]
    fn spawns_still_at_cell_center() {
        let maze = corridor();
        let agent = Agent::spawn(&maze, CellPos::new(1, 1), AGENT_SPEED);
        assert_eq!(agent.position(), Point::new(60.0, 60.0));
        assert_eq!(agent.direction(), Direction::Still);
        assert_eq!(agent.movement(), MovementState::Normal);
    }

    #[test]
    fn adopts_open_pending_direction_at_center() {
        let mut maze = corridor();
        let mut agent = Agent::spawn(&maze, CellPos::new(1, 1), AGENT_SPEED);
        agent.set_pending_direction(Direction::Right);
        agent.tick(&mut maze, &mut no_boost());
        assert_eq!(agent.direction(), Direction::Right);
        assert_eq!(agent.position(), Point::new(65.0, 60.0));
    }

    #[test]
    fn blocked_pending_direction_stops_agent() {
        let mut maze = corridor();
        let mut agent = Agent::spawn(&maze, CellPos::new(1, 1), AGENT_SPEED);
        agent.set_pending_direction(Direction::Up);
        agent.tick(&mut maze, &mut no_boost());
        assert_eq!(agent.direction(), Direction::Still);
        assert_eq!(agent.position(), Point::new(60.0, 60.0));
    }

    #[test]
    fn off_center_ticks_ignore_pending_and_dots() {
        let mut maze = corridor();
        let mut agent = Agent::spawn(&maze, CellPos::new(1, 1), AGENT_SPEED);
        let eaten = counting(&mut agent);
        agent.set_pending_direction(Direction::Right);
        agent.tick(&mut maze, &mut no_boost());
        assert_eq!(eaten.get(), 1);

        agent.set_pending_direction(Direction::Left);
        // 65 -> 85: the agent crosses into column 2 without reaching its center.
        for _ in 0..4 {
            agent.tick(&mut maze, &mut no_boost());
            assert_eq!(agent.direction(), Direction::Right);
        }
        assert_eq!(agent.position(), Point::new(85.0, 60.0));
        assert_eq!(maze.pixel_to_cell(agent.position()), CellPos::new(1, 2));
        assert!(maze.has_dot(CellPos::new(1, 2)));
        assert_eq!(eaten.get(), 1);
    }

    #[test]
    fn buffered_turn_is_taken_at_the_intersection() {
        let mut maze = corridor();
        let mut agent = Agent::spawn(&maze, CellPos::new(1, 1), AGENT_SPEED);
        agent.set_pending_direction(Direction::Right);
        agent.tick(&mut maze, &mut no_boost());
        agent.set_pending_direction(Direction::Down);
        for _ in 0..7 {
            agent.tick(&mut maze, &mut no_boost());
        }
        assert_eq!(agent.position(), Point::new(100.0, 60.0));
        assert_eq!(agent.direction(), Direction::Right);

        agent.tick(&mut maze, &mut no_boost());
        assert_eq!(agent.direction(), Direction::Down);
        assert_eq!(agent.position(), Point::new(100.0, 65.0));
    }

    #[test]
    fn observers_fire_in_registration_order() {
        let mut maze = corridor();
        let mut agent = Agent::spawn(&maze, CellPos::new(1, 1), AGENT_SPEED);
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            agent.register_pickup_observer(move |pickup| log.borrow_mut().push((tag, pickup.cell)));
        }
        agent.tick(&mut maze, &mut no_boost());
        assert_eq!(
            *log.borrow(),
            vec![("first", CellPos::new(1, 1)), ("second", CellPos::new(1, 1))]
        );
    }

    #[test]
    fn eaten_dot_does_not_notify_twice() {
        let mut maze = corridor();
        let mut agent = Agent::spawn(&maze, CellPos::new(1, 1), AGENT_SPEED);
        let eaten = counting(&mut agent);
        agent.tick(&mut maze, &mut no_boost());
        agent.tick(&mut maze, &mut no_boost());
        assert!(!maze.has_dot(CellPos::new(1, 1)));
        assert_eq!(eaten.get(), 1);
    }

    #[test]
    fn lucky_pickup_boosts_speed() {
        let mut maze = corridor();
        let mut agent = Agent::spawn(&maze, CellPos::new(1, 1), AGENT_SPEED);
        agent.set_pending_direction(Direction::Right);
        agent.tick(&mut maze, &mut StepRng::new(0, 0));
        assert_eq!(agent.movement(), MovementState::Boosted { elapsed: 1 });
        assert_eq!(agent.position(), Point::new(70.0, 60.0));
    }
}
