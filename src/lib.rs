//! Boost Lander - a retro thrust-and-land arcade game
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (craft, pilot control, collision outcomes)
//! - `host`: Narrow traits for the engine-supplied collaborators
//! - `timer`: Deferred-task queue behind delayed scene transitions
//! - `scene`: Scene roster and load-target resolution
//! - `audio`: Procedural Web Audio backend (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod host;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod timer;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Angular speed while a single rotation key is held (radians/sec)
    pub const ROTATE_SPEED: f32 = 1.9;
    /// Thrust impulse per second of held thrust, along the craft's local up
    pub const THRUST_FORCE: f32 = 7.5;
    /// Downward gravity acceleration (units/sec²)
    pub const GRAVITY: f32 = 2.8;

    /// Wall-clock delay before a crash reloads the level (seconds)
    pub const RELOAD_DELAY: f32 = 1.0;
    /// Wall-clock delay before a landing advances to the next level (seconds)
    pub const NEXT_LEVEL_DELAY: f32 = 1.5;

    /// Craft collision radius
    pub const CRAFT_RADIUS: f32 = 0.75;
    /// Levels in the default roster
    pub const LEVEL_COUNT: usize = 3;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 100.0;
    pub const FIELD_HEIGHT: f32 = 60.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Rotate a vector from the craft's local frame into world space.
/// Heading 0 points straight up (+Y); positive headings turn counterclockwise.
#[inline]
pub fn local_to_world(v: Vec2, heading: f32) -> Vec2 {
    let (sin, cos) = heading.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
