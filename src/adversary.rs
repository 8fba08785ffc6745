use rand::Rng;

use crate::agent::{Agent, AgentId};
use crate::geometry::Point;
use crate::strategy::{Owner, Strategy};

pub const ADVERSARY_SPEED: f32 = 4.0;

#[derive(Debug, Clone)]
pub struct Adversary {
    position: Point,
    step: f32,
    strategy: Strategy,
    targets: Vec<AgentId>,
}

impl Adversary {
    pub fn new(position: Point, strategy: Strategy) -> Self {
        Self {
            position,
            step: ADVERSARY_SPEED,
            strategy,
            targets: Vec::new(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn targets(&self) -> &[AgentId] {
        &self.targets
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    pub fn track(&mut self, agent: AgentId) {
        self.targets.push(agent);
    }

    /// Moves to wherever the strategy says. Target ids that do not resolve
    /// in `agents` are skipped.
    pub fn tick<R: Rng + ?Sized>(&mut self, agents: &[Agent], rng: &mut R) {
        let targets: Vec<Point> = self
            .targets
            .iter()
            .filter_map(|id| agents.get(id.0))
            .map(Agent::position)
            .collect();
        let owner = Owner {
            position: self.position,
            step: self.step,
            targets: &targets,
        };
        self.position = self.strategy.find_next_position(Some(&owner), rng);
    }
}
