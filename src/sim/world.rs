//! Level geometry and contact detection
//!
//! The host shells use this minimal world in place of a full physics engine:
//! axis-aligned surfaces with their collision category baked in, gravity on
//! the craft, and edge-triggered contact events (a surface reports a contact
//! only on the frame it begins).

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::state::{CollisionKind, Craft};

/// Axis-aligned surface, classified at construction time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surface {
    pub kind: CollisionKind,
    pub min: Vec2,
    pub max: Vec2,
}

impl Surface {
    pub fn new(kind: CollisionKind, min: Vec2, max: Vec2) -> Self {
        Self { kind, min, max }
    }

    /// Closest-point overlap test against the craft's circle
    pub fn touches(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        center.distance_squared(closest) <= radius * radius
    }
}

/// One playable level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub index: usize,
    pub spawn: Vec2,
    pub surfaces: Vec<Surface>,
}

impl Level {
    /// Build a level: fixed pads, seeded obstacle and fuel placement.
    /// Later levels get more pillars and taller terrain.
    pub fn generate(index: usize, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed.wrapping_add(index as u64));
        let mut surfaces = Vec::new();

        // Ground strip is hazardous; the pads sit on top of it
        surfaces.push(Surface::new(
            CollisionKind::Hazard,
            Vec2::new(0.0, 0.0),
            Vec2::new(FIELD_WIDTH, 2.0),
        ));

        // Launch pad (left) and landing pad (right)
        surfaces.push(Surface::new(
            CollisionKind::Neutral,
            Vec2::new(5.0, 2.0),
            Vec2::new(15.0, 4.0),
        ));
        surfaces.push(Surface::new(
            CollisionKind::Goal,
            Vec2::new(FIELD_WIDTH - 15.0, 2.0),
            Vec2::new(FIELD_WIDTH - 5.0, 4.0),
        ));

        // Hazard pillars between the pads
        let pillar_count = 2 + index;
        for _ in 0..pillar_count {
            let x = rng.random_range(20.0..FIELD_WIDTH - 24.0);
            let height = rng.random_range(6.0..14.0 + 2.0 * index as f32);
            surfaces.push(Surface::new(
                CollisionKind::Hazard,
                Vec2::new(x, 2.0),
                Vec2::new(x + 4.0, 2.0 + height),
            ));
        }

        // Floating fuel canisters
        let fuel_count = 1 + index / 2;
        for _ in 0..fuel_count {
            let x = rng.random_range(20.0..FIELD_WIDTH - 22.0);
            let y = rng.random_range(18.0..FIELD_HEIGHT - 10.0);
            surfaces.push(Surface::new(
                CollisionKind::Fuel,
                Vec2::new(x, y),
                Vec2::new(x + 2.0, y + 2.0),
            ));
        }

        Self {
            index,
            spawn: Vec2::new(10.0, 4.0 + CRAFT_RADIUS),
            surfaces,
        }
    }
}

/// Edge-triggered contact tracking for the craft against level surfaces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactTracker {
    touching: Vec<bool>,
}

impl ContactTracker {
    pub fn new(surface_count: usize) -> Self {
        Self {
            touching: vec![false; surface_count],
        }
    }

    /// Report the categories of surfaces whose contact began this frame
    pub fn begin_contacts(&mut self, craft: &Craft, surfaces: &[Surface]) -> Vec<CollisionKind> {
        let mut events = Vec::new();
        for (i, surface) in surfaces.iter().enumerate() {
            let now = surface.touches(craft.pos, craft.radius);
            if now && !self.touching[i] {
                events.push(surface.kind);
            }
            self.touching[i] = now;
        }
        events
    }
}

/// Craft plus level geometry, stepped once per frame by the host loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub craft: Craft,
    pub level: Level,
    contacts: ContactTracker,
}

impl World {
    pub fn new(level: Level) -> Self {
        let craft = Craft::new(level.spawn);
        let contacts = ContactTracker::new(level.surfaces.len());
        Self {
            craft,
            level,
            contacts,
        }
    }

    /// Integrate one frame and report freshly begun contacts
    pub fn step(&mut self, dt: f32) -> Vec<CollisionKind> {
        self.craft.step(dt);
        self.rest_on_pads();
        self.contacts.begin_contacts(&self.craft, &self.level.surfaces)
    }

    /// Pads are solid: a craft descending onto one rests on top instead of
    /// sinking through. Hazard and fuel surfaces need no response - their
    /// outcomes end or don't affect the flight.
    fn rest_on_pads(&mut self) {
        let craft = &mut self.craft;
        if craft.vel.y > 0.0 {
            return;
        }
        for surface in &self.level.surfaces {
            let is_pad = matches!(surface.kind, CollisionKind::Neutral | CollisionKind::Goal);
            if is_pad
                && craft.pos.x >= surface.min.x
                && craft.pos.x <= surface.max.x
                && craft.pos.y >= surface.max.y
                && surface.touches(craft.pos, craft.radius)
            {
                craft.pos.y = surface.max.y + craft.radius;
                craft.vel.y = 0.0;
            }
        }
    }
}
