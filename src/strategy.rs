use rand::Rng;

use crate::geometry::{Point, ORIGIN};

pub const WANDER_RANGE: i32 = 5;

/// What a strategy may look up about the adversary it drives. Borrowed for
/// the duration of one call.
#[derive(Debug, Clone, Copy)]
pub struct Owner<'a> {
    pub position: Point,
    pub step: f32,
    pub targets: &'a [Point],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Home in on the first tracked target, at most `step` pixels per tick.
    Pursuit,
    /// Random walk, ignoring walls.
    Wander,
}

impl Strategy {
    /// Without an owner both variants fall back to the origin.
    pub fn find_next_position<R: Rng + ?Sized>(self, owner: Option<&Owner<'_>>, rng: &mut R) -> Point {
        let Some(owner) = owner else {
            return ORIGIN;
        };
        match self {
            Strategy::Wander => {
                let dx = rng.gen_range(-WANDER_RANGE..=WANDER_RANGE);
                let dy = rng.gen_range(-WANDER_RANGE..=WANDER_RANGE);
                owner.position + Point::new(dx as f32, dy as f32)
            }
            Strategy::Pursuit => match owner.targets.first() {
                Some(&target) => owner.position + capped(target - owner.position, owner.step),
                None => ORIGIN,
            },
        }
    }
}

fn capped(delta: Point, step: f32) -> Point {
    let len = delta.length();
    if len > step {
        Point::new(delta.x / len * step, delta.y / len * step)
    } else {
        delta
    }
}
