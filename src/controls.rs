use crate::agent::AgentId;
use crate::direction::Direction;
use crate::game::{PLAYER_ONE, PLAYER_TWO};

/// Eight-key two-player layout: WASD for player one, IJKL for player two.
pub fn binding(key: char) -> Option<(AgentId, Direction)> {
    let bound = match key.to_ascii_uppercase() {
        'W' => (PLAYER_ONE, Direction::Up),
        'A' => (PLAYER_ONE, Direction::Left),
        'S' => (PLAYER_ONE, Direction::Down),
        'D' => (PLAYER_ONE, Direction::Right),
        'I' => (PLAYER_TWO, Direction::Up),
        'J' => (PLAYER_TWO, Direction::Left),
        'K' => (PLAYER_TWO, Direction::Down),
        'L' => (PLAYER_TWO, Direction::Right),
        _ => return None,
    };
    Some(bound)
}
