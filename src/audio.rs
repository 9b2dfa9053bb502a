//! Audio system using Web Audio API
//!
//! Every effect is a short oscillator sweep or arpeggio, so nothing has to be
//! downloaded.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Jump,
    Land,
    Crash,
    LevelClear,
    Victory,
    HighScore,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(Self::Jump),
            GameEvent::Landed => Some(Self::Land),
            GameEvent::Crashed { .. } => Some(Self::Crash),
            GameEvent::LevelCleared { .. } => Some(Self::LevelClear),
            GameEvent::Won => Some(Self::Victory),
            GameEvent::LevelStarted { .. } => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        // Fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Jump => {
                self.sweep(ctx, (220.0, 660.0), 0.12, vol * 0.25, OscillatorType::Square)
            }
            SoundEffect::Land => {
                self.sweep(ctx, (120.0, 60.0), 0.06, vol * 0.2, OscillatorType::Sine)
            }
            SoundEffect::Crash => {
                self.sweep(ctx, (300.0, 30.0), 0.5, vol * 0.5, OscillatorType::Sawtooth);
                self.arpeggio(ctx, &[400.0, 300.0, 200.0], 0.15, vol * 0.25, OscillatorType::Sine);
            }
            SoundEffect::LevelClear => self.arpeggio(
                ctx,
                &[400.0, 500.0, 600.0, 800.0],
                0.1,
                vol * 0.3,
                OscillatorType::Triangle,
            ),
            SoundEffect::Victory => self.arpeggio(
                ctx,
                &[523.0, 659.0, 784.0, 1047.0, 784.0, 1047.0],
                0.12,
                vol * 0.3,
                OscillatorType::Triangle,
            ),
            SoundEffect::HighScore => self.arpeggio(
                ctx,
                &[500.0, 600.0, 700.0, 800.0, 1000.0],
                0.08,
                vol * 0.25,
                OscillatorType::Triangle,
            ),
        }
    }

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

    /// One tone gliding between two frequencies, fading out
    fn sweep(
        &self,
        ctx: &AudioContext,
        (from, to): (f32, f32),
        duration: f64,
        level: f32,
        osc_type: OscillatorType,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(level, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + duration + 0.05).ok();
    }

    /// Notes played one after another, `gap` seconds apart
    fn arpeggio(
        &self,
        ctx: &AudioContext,
        notes: &[f32],
        gap: f64,
        level: f32,
        osc_type: OscillatorType,
    ) {
        for (i, freq) in notes.iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) else {
                continue;
            };
            let t = ctx.current_time() + i as f64 * gap;
            gain.gain().set_value_at_time(level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + gap * 2.5)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + gap * 3.0).ok();
        }
    }
}
