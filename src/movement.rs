use rand::Rng;
use tracing::debug;

use crate::direction::Direction;
use crate::geometry::Point;

pub const BOOST_CHANCE: f64 = 0.1;
pub const BOOST_TICKS: u32 = 50;

/// Speed regime of a player agent. Transitions return a new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementState {
    #[default]
    Normal,
    Boosted { elapsed: u32 },
}

impl MovementState {
    pub fn is_boosted(self) -> bool {
        matches!(self, MovementState::Boosted { .. })
    }

    pub fn speed(self, base: f32) -> f32 {
        match self {
            MovementState::Normal => base,
            MovementState::Boosted { .. } => 2.0 * base,
        }
    }

    /// Called after a dot is eaten. Only `Normal` can roll into a boost.
    pub fn upgrade<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        match self {
            MovementState::Normal => {
                if rng.gen::<f64>() < BOOST_CHANCE {
                    debug!("speed boost started");
                    MovementState::Boosted { elapsed: 0 }
                } else {
                    self
                }
            }
            MovementState::Boosted { .. } => self,
        }
    }

    /// Counts one boosted tick.
    pub fn advance(self) -> Self {
        match self {
            MovementState::Normal => self,
            MovementState::Boosted { elapsed } => {
                let elapsed = elapsed + 1;
                if elapsed > BOOST_TICKS {
                    debug!(elapsed, "speed boost ended");
                    MovementState::Normal
                } else {
                    MovementState::Boosted { elapsed }
                }
            }
        }
    }

    /// Moves `position` one tick along `direction` and returns the state for
    /// the next tick.
    pub fn apply_displacement(self, position: &mut Point, direction: Direction, base: f32) -> Self {
        let (ox, oy) = direction.offset();
        let speed = self.speed(base);
        *position = *position + Point::new(ox * speed, oy * speed);
        self.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;

    fn always_low() -> StepRng {
        StepRng::new(0, 0)
    }

    fn always_high() -> StepRng {
        StepRng::new(1 << 63, 0)
    }

    #[test]
    fn normal_upgrades_on_low_roll() {
        let state = MovementState::Normal.upgrade(&mut always_low());
        assert_eq!(state, MovementState::Boosted { elapsed: 0 });
    }

    #[test]
    fn normal_stays_on_high_roll() {
        let state = MovementState::Normal.upgrade(&mut always_high());
        assert_eq!(state, MovementState::Normal);
    }

    #[test]
    fn boosted_upgrade_does_not_reset_counter() {
        let state = MovementState::Boosted { elapsed: 30 }.upgrade(&mut always_low());
        assert_eq!(state, MovementState::Boosted { elapsed: 30 });
    }

    #[test]
    fn boost_ends_on_fifty_first_advance() {
        let mut state = MovementState::Boosted { elapsed: 0 };
        for call in 1..=50 {
            state = state.advance();
            assert_eq!(state, MovementState::Boosted { elapsed: call });
        }
        assert_eq!(state.advance(), MovementState::Normal);
    }

    #[test]
    fn final_boosted_tick_still_moves_double() {
        let mut pos = Point::new(0.0, 0.0);
        let next = MovementState::Boosted { elapsed: 50 }.apply_displacement(
            &mut pos,
            Direction::Right,
            5.0,
        );
        assert_eq!(pos, Point::new(10.0, 0.0));
        assert_eq!(next, MovementState::Normal);
    }

    #[test]
    fn still_direction_does_not_move() {
        let mut pos = Point::new(3.0, 4.0);
        let _ = MovementState::Normal.apply_displacement(&mut pos, Direction::Still, 5.0);
        assert_eq!(pos, Point::new(3.0, 4.0));
    }

    fn moving() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn displacement_is_base_speed_when_normal(dir in moving(), base in 1u8..20) {
            let base = f32::from(base);
            let start = Point::new(100.0, 100.0);
            let mut pos = start;
            let _ = MovementState::Normal.apply_displacement(&mut pos, dir, base);
            prop_assert_eq!((pos - start).length(), base);
        }

        #[test]
        fn displacement_is_double_speed_when_boosted(
            dir in moving(),
            base in 1u8..20,
            elapsed in 0u32..=BOOST_TICKS,
        ) {
            let base = f32::from(base);
            let start = Point::new(100.0, 100.0);
            let mut pos = start;
            let _ = MovementState::Boosted { elapsed }.apply_displacement(&mut pos, dir, base);
            prop_assert_eq!((pos - start).length(), 2.0 * base);
        }
    }
}
