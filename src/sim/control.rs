//! Pilot control
//!
//! Translates the per-frame input poll into craft motion and thrust audio.
//! Behavior is frame-rate independent: every applied quantity scales by `dt`.

use glam::Vec2;

use crate::host::{AudioChannel, RigidBody, SoundCue};

/// Input signals sampled once per frame
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
}

/// Per-frame pilot control for one craft
#[derive(Debug, Clone)]
pub struct PilotControl {
    rotate_speed: f32,
    thrust_force: f32,
    enabled: bool,
}

impl PilotControl {
    pub fn new(rotate_speed: f32, thrust_force: f32) -> Self {
        Self {
            rotate_speed,
            thrust_force,
            enabled: true,
        }
    }

    /// Outcome sequences switch the pilot off; nothing switches it back on
    /// for the lifetime of the craft
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Process one frame of input
    pub fn tick(
        &mut self,
        input: &ControlInput,
        dt: f32,
        body: &mut dyn RigidBody,
        audio: &mut dyn AudioChannel,
    ) {
        if !self.enabled {
            return;
        }
        self.apply_thrust(input, dt, body, audio);
        self.apply_rotation(input, dt, body);
    }

    fn apply_thrust(
        &self,
        input: &ControlInput,
        dt: f32,
        body: &mut dyn RigidBody,
        audio: &mut dyn AudioChannel,
    ) {
        if input.thrust {
            body.apply_relative_impulse(Vec2::Y * self.thrust_force * dt);
            if !audio.is_playing() {
                audio.play_loop(SoundCue::Thrust);
            }
        } else {
            // Unconditional stop; stopping an idle channel is harmless
            audio.stop();
        }
    }

    fn apply_rotation(&self, input: &ControlInput, dt: f32, body: &mut dyn RigidBody) {
        // Both keys held cancel out
        let direction = match (input.rotate_left, input.rotate_right) {
            (true, true) | (false, false) => return,
            (true, false) => 1.0,
            (false, true) => -1.0,
        };

        // Suspend the integrator's rotational response around the manual write
        body.set_rotation_frozen(true);
        body.rotate(direction * self.rotate_speed * dt);
        body.set_rotation_frozen(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ROTATE_SPEED, THRUST_FORCE};
    use crate::host::fakes::RecordingChannel;
    use crate::sim::state::Craft;

    const DT: f32 = 1.0 / 60.0;

    fn rig() -> (PilotControl, Craft, RecordingChannel) {
        (
            PilotControl::new(ROTATE_SPEED, THRUST_FORCE),
            Craft::new(Vec2::ZERO),
            RecordingChannel::default(),
        )
    }

    #[test]
    fn test_both_rotation_keys_cancel_out() {
        let (mut pilot, mut craft, mut audio) = rig();
        let input = ControlInput {
            rotate_left: true,
            rotate_right: true,
            ..Default::default()
        };

        pilot.tick(&input, DT, &mut craft, &mut audio);
        assert_eq!(craft.heading, 0.0);
    }

    #[test]
    fn test_single_rotation_scales_by_dt() {
        let (mut pilot, mut craft, mut audio) = rig();

        let left = ControlInput {
            rotate_left: true,
            ..Default::default()
        };
        pilot.tick(&left, DT, &mut craft, &mut audio);
        assert!((craft.heading - ROTATE_SPEED * DT).abs() < 1e-6);

        let right = ControlInput {
            rotate_right: true,
            ..Default::default()
        };
        pilot.tick(&right, DT, &mut craft, &mut audio);
        pilot.tick(&right, DT, &mut craft, &mut audio);
        assert!((craft.heading - (-ROTATE_SPEED * DT)).abs() < 1e-6);
    }

    #[test]
    fn test_thrust_impulse_iff_held() {
        let (mut pilot, mut craft, mut audio) = rig();

        pilot.tick(&ControlInput::default(), DT, &mut craft, &mut audio);
        assert_eq!(craft.vel, Vec2::ZERO);

        let thrust = ControlInput {
            thrust: true,
            ..Default::default()
        };
        pilot.tick(&thrust, DT, &mut craft, &mut audio);
        assert!((craft.vel.y - THRUST_FORCE * DT).abs() < 1e-6);
        assert_eq!(craft.vel.x, 0.0);
    }

    #[test]
    fn test_thrust_loop_starts_once() {
        let (mut pilot, mut craft, mut audio) = rig();
        let thrust = ControlInput {
            thrust: true,
            ..Default::default()
        };

        pilot.tick(&thrust, DT, &mut craft, &mut audio);
        pilot.tick(&thrust, DT, &mut craft, &mut audio);
        pilot.tick(&thrust, DT, &mut craft, &mut audio);

        assert_eq!(audio.loops_started, vec![SoundCue::Thrust]);
    }

    #[test]
    fn test_release_stops_even_when_already_stopped() {
        let (mut pilot, mut craft, mut audio) = rig();
        let thrust = ControlInput {
            thrust: true,
            ..Default::default()
        };

        pilot.tick(&thrust, DT, &mut craft, &mut audio);
        pilot.tick(&ControlInput::default(), DT, &mut craft, &mut audio);
        pilot.tick(&ControlInput::default(), DT, &mut craft, &mut audio);

        assert_eq!(audio.stops, 2);
        assert!(!audio.playing);

        // Holding thrust again restarts the loop
        pilot.tick(&thrust, DT, &mut craft, &mut audio);
        assert_eq!(audio.loops_started.len(), 2);
    }

    #[test]
    fn test_disabled_pilot_is_inert() {
        let (mut pilot, mut craft, mut audio) = rig();
        pilot.disable();

        let input = ControlInput {
            rotate_left: true,
            thrust: true,
            ..Default::default()
        };
        pilot.tick(&input, DT, &mut craft, &mut audio);

        assert_eq!(craft.vel, Vec2::ZERO);
        assert_eq!(craft.heading, 0.0);
        assert!(audio.loops_started.is_empty());
        assert_eq!(audio.stops, 0);
    }

    #[test]
    fn test_rotation_write_is_freeze_bracketed() {
        use crate::host::RigidBody;

        /// Body that records whether the freeze flag was up during each write
        #[derive(Default)]
        struct ProbeBody {
            frozen: bool,
            heading: f32,
            writes_while_frozen: Vec<bool>,
        }

        impl RigidBody for ProbeBody {
            fn apply_relative_impulse(&mut self, _impulse: Vec2) {}
            fn heading(&self) -> f32 {
                self.heading
            }
            fn rotate(&mut self, delta: f32) {
                self.writes_while_frozen.push(self.frozen);
                self.heading += delta;
            }
            fn rotation_frozen(&self) -> bool {
                self.frozen
            }
            fn set_rotation_frozen(&mut self, frozen: bool) {
                self.frozen = frozen;
            }
        }

        let mut pilot = PilotControl::new(ROTATE_SPEED, THRUST_FORCE);
        let mut body = ProbeBody::default();
        let mut audio = RecordingChannel::default();
        let input = ControlInput {
            rotate_left: true,
            ..Default::default()
        };

        pilot.tick(&input, DT, &mut body, &mut audio);

        assert_eq!(body.writes_while_frozen, vec![true]);
        // Freeze lifted again once the write is done
        assert!(!body.frozen);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_cancel_out_for_any_dt(dt in 0.0f32..0.25) {
                let (mut pilot, mut craft, mut audio) = rig();
                let input = ControlInput {
                    rotate_left: true,
                    rotate_right: true,
                    thrust: false,
                };
                pilot.tick(&input, dt, &mut craft, &mut audio);
                prop_assert_eq!(craft.heading, 0.0);
            }
        }
    }
}
