//! Collision outcome sequences
//!
//! Classifies contact events delivered by the host physics step and drives the
//! one-shot crash/finish sequences. The latch check is the very first action
//! of both sequences; fuel pickups bypass the latch entirely.

use crate::host::{AudioChannel, ParticleEmitter, SoundCue};
use crate::scene::SceneRequest;
use crate::sim::control::PilotControl;
use crate::sim::state::{CollisionKind, CraftPhase};
use crate::timer::DelayQueue;

/// Mutable borrows of everything an outcome sequence touches
pub struct OutcomeHooks<'a> {
    pub control: &'a mut PilotControl,
    pub audio: &'a mut dyn AudioChannel,
    pub crash_particles: &'a mut dyn ParticleEmitter,
    pub success_particles: &'a mut dyn ParticleEmitter,
    pub transitions: &'a mut DelayQueue<SceneRequest>,
}

/// Collision outcome handler, one per craft lifetime
#[derive(Debug)]
pub struct CollisionOutcome {
    phase: CraftPhase,
    reload_delay: f32,
    next_level_delay: f32,
    refuels: u32,
}

impl CollisionOutcome {
    pub fn new(reload_delay: f32, next_level_delay: f32) -> Self {
        Self {
            phase: CraftPhase::Active,
            reload_delay,
            next_level_delay,
            refuels: 0,
        }
    }

    pub fn phase(&self) -> CraftPhase {
        self.phase
    }

    /// Fuel pickups collected over this craft's lifetime
    pub fn refuel_count(&self) -> u32 {
        self.refuels
    }

    /// Entry point for contact events from the host physics step
    pub fn on_collision(&mut self, kind: CollisionKind, hooks: &mut OutcomeHooks<'_>) {
        match kind {
            CollisionKind::Hazard => self.start_crash_sequence(hooks),
            CollisionKind::Fuel => self.refuel(),
            CollisionKind::Goal => self.start_finish_sequence(hooks),
            CollisionKind::Neutral => {}
        }
    }

    /// Side-effect order is significant: feedback sound off, particles,
    /// controls off, impact sound, then the deferred reload
    fn start_crash_sequence(&mut self, hooks: &mut OutcomeHooks<'_>) {
        if self.phase == CraftPhase::Transitioning {
            return;
        }
        self.phase = CraftPhase::Transitioning;

        hooks.audio.stop();
        hooks.crash_particles.play();
        hooks.control.disable();
        hooks.audio.play_one_shot(SoundCue::Crash);
        hooks
            .transitions
            .schedule(self.reload_delay, SceneRequest::Reload);
        self.kill_player();

        log::info!("crash sequence started, reloading in {}s", self.reload_delay);
    }

    fn start_finish_sequence(&mut self, hooks: &mut OutcomeHooks<'_>) {
        if self.phase == CraftPhase::Transitioning {
            return;
        }
        self.phase = CraftPhase::Transitioning;

        hooks.audio.stop();
        hooks.success_particles.play();
        hooks.control.disable();
        hooks.audio.play_one_shot(SoundCue::Success);
        hooks
            .transitions
            .schedule(self.next_level_delay, SceneRequest::Advance);

        log::info!(
            "finish sequence started, advancing in {}s",
            self.next_level_delay
        );
    }

    /// Placeholder until a fuel gauge component exists
    fn refuel(&mut self) {
        self.refuels += 1;
        log::debug!("fuel pickup collected ({} total)", self.refuels);
        // TODO: top up the fuel gauge once the fuel component lands
    }

    /// Placeholder death effect
    fn kill_player(&self) {
        log::debug!("craft destroyed");
    }
}
