//! Craft entity and core gameplay types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::host::RigidBody;
use crate::{local_to_world, normalize_angle};

/// Collision category, resolved once when the collision object is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Terrain and obstacles; first touch starts the crash sequence
    Hazard,
    /// Fuel canister; repeatable pickup
    Fuel,
    /// Landing pad; first touch starts the finish sequence
    Goal,
    /// Launch pad and other harmless scenery
    Neutral,
}

/// Outcome latch, one per craft lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CraftPhase {
    #[default]
    Active,
    /// A crash or finish sequence has started; set once, never reset
    Transitioning,
}

/// The player-controlled craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radians, 0 = straight up, positive = counterclockwise
    pub heading: f32,
    pub radius: f32,
    rotation_frozen: bool,
}

impl Craft {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            heading: 0.0,
            radius: CRAFT_RADIUS,
            rotation_frozen: false,
        }
    }

    /// Integrate gravity and velocity for one frame
    pub fn step(&mut self, dt: f32) {
        self.vel.y -= GRAVITY * dt;
        self.pos += self.vel * dt;
    }
}

impl RigidBody for Craft {
    fn apply_relative_impulse(&mut self, impulse: Vec2) {
        self.vel += local_to_world(impulse, self.heading);
    }

    fn heading(&self) -> f32 {
        self.heading
    }

    fn rotate(&mut self, delta: f32) {
        self.heading = normalize_angle(self.heading + delta);
    }

    fn rotation_frozen(&self) -> bool {
        self.rotation_frozen
    }

    fn set_rotation_frozen(&mut self, frozen: bool) {
        self.rotation_frozen = frozen;
    }
}
