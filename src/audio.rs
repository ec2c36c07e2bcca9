//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::host::{AudioChannel, SoundCue};

/// Audio manager for the game.
///
/// One looping slot (the thrust rumble) plus fire-and-forget one-shots, which
/// is all the craft's single audio source needs.
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Nodes of the running thrust loop, if any
    loop_nodes: Option<(OscillatorNode, GainNode)>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            loop_nodes: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Thrust rumble - low sawtooth that keeps running until stopped
    fn start_thrust_loop(&mut self, vol: f32) {
        let Some(ctx) = &self.ctx else { return };
        let Some((osc, gain)) = self.create_osc(ctx, 55.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.0001, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time((vol * 0.35).max(0.0001), t + 0.08)
            .ok();

        osc.start().ok();
        self.loop_nodes = Some((osc, gain));
    }

    /// Crash - descending boom with a noise-like crackle on top
    fn play_crash(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        // Bass impact
        if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(120.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.45)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.55).ok();
        }

        // Crackle - fast frequency jumps
        if let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency().set_value_at_time(900.0, t).ok();
            osc.frequency().set_value_at_time(500.0, t + 0.04).ok();
            osc.frequency().set_value_at_time(1200.0, t + 0.08).ok();
            osc.frequency().set_value_at_time(300.0, t + 0.12).ok();
            osc.frequency().set_value_at_time(700.0, t + 0.18).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }
    }

    /// Success - rising major arpeggio
    fn play_success(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        let notes = [523.25, 659.25, 783.99, 1046.5]; // C5 E5 G5 C6

        for (i, freq) in notes.iter().enumerate() {
            let start = t + i as f64 * 0.11;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                gain.gain().set_value_at_time(0.0001, start).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(vol * 0.35, start + 0.02)
                    .ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.3)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.35).ok();
            }
        }
    }
}

impl AudioChannel for AudioManager {
    fn play_loop(&mut self, cue: SoundCue) {
        if self.loop_nodes.is_some() {
            return;
        }
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.resume();

        match cue {
            SoundCue::Thrust => self.start_thrust_loop(vol),
            // Only the thrust cue loops; anything else degrades to a one-shot
            other => self.play_one_shot(other),
        }
    }

    fn play_one_shot(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Crash => self.play_crash(ctx, vol),
            SoundCue::Success => self.play_success(ctx, vol),
            SoundCue::Thrust => {}
        }
    }

    fn is_playing(&self) -> bool {
        self.loop_nodes.is_some()
    }

    fn stop(&mut self) {
        let Some((osc, gain)) = self.loop_nodes.take() else {
            return;
        };
        if let Some(ctx) = &self.ctx {
            let t = ctx.current_time();
            // Short release ramp to avoid a click
            gain.gain().cancel_scheduled_values(t).ok();
            gain.gain().set_value_at_time(gain.gain().value(), t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.0001, t + 0.05)
                .ok();
            osc.stop_with_when(t + 0.06).ok();
        } else {
            osc.stop().ok();
        }
    }
}
