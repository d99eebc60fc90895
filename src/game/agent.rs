use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::resources::{ResourceBundle, ResourceError, cost_of};
use crate::types::{BuildKind, Resource};

/// A participating player: a display name, a victory-point count, and a hand
/// of resource units. The engine addresses agents by table index
/// ([`AgentId`](crate::board::AgentId)).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    name: String,
    victory_points: u8,
    hand: ResourceBundle,
}

impl Agent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            victory_points: 0,
            hand: ResourceBundle::zero(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn victory_points(&self) -> u8 {
        self.victory_points
    }

    /// Adds or removes points; the count never drops below zero.
    pub fn add_victory_points(&mut self, delta: i8) {
        if delta >= 0 {
            self.victory_points = self.victory_points.saturating_add(delta as u8);
        } else {
            self.victory_points = self.victory_points.saturating_sub(delta.unsigned_abs());
        }
    }

    pub fn hand(&self) -> &ResourceBundle {
        &self.hand
    }

    pub fn hand_size(&self) -> u32 {
        self.hand.total()
    }

    pub fn add_resource(&mut self, resource: Resource, amount: u8) {
        self.hand.add(resource, amount);
    }

    pub fn remove_resource(&mut self, resource: Resource) -> Result<(), ResourceError> {
        self.hand.subtract(resource, 1)
    }

    /// A uniformly random unit from the hand, weighted by count. `None` when
    /// the hand is empty.
    pub fn random_resource_from_hand(&self, rng: &mut impl Rng) -> Option<Resource> {
        let total = self.hand.total();
        if total == 0 {
            return None;
        }
        let mut pick = rng.gen_range(0..total);
        for (resource, count) in self.hand.iter() {
            let count = count as u32;
            if pick < count {
                return Some(resource);
            }
            pick -= count;
        }
        None
    }

    /// Removes one uniformly random unit and returns its kind.
    pub fn discard_random(&mut self, rng: &mut impl Rng) -> Option<Resource> {
        let resource = self.random_resource_from_hand(rng)?;
        self.hand
            .subtract(resource, 1)
            .expect("picked resource is in hand");
        Some(resource)
    }

    pub fn can_afford(&self, kind: BuildKind) -> bool {
        self.hand.can_afford(cost_of(kind))
    }

    pub fn deduct_cost(&mut self, kind: BuildKind) -> Result<(), ResourceError> {
        self.hand.subtract_bundle(cost_of(kind))
    }
}
