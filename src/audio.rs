//! Web Audio blip played on each animation tick.
//!
//! The context is opened once per session and closed on teardown. A missing
//! or failing audio device never interrupts the visual animation: every
//! failure is logged at warn level and otherwise swallowed.

use log::warn;
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

const TONE_FREQ_HZ: f32 = 440.0;
const TONE_PEAK_GAIN: f32 = 0.1;
const TONE_FLOOR_GAIN: f32 = 0.001;
const TONE_DECAY_SECS: f64 = 0.1;

/// Session-scoped handle to the audio output device.
pub struct BlipPlayer {
    ctx: Option<AudioContext>,
}

impl BlipPlayer {
    pub fn new() -> Self {
        let ctx = match AudioContext::new() {
            Ok(ctx) => Some(ctx),
            Err(err) => {
                warn!("Audio unavailable, draws will be silent: {:?}", err);
                None
            }
        };
        Self { ctx }
    }

    /// Emit one short sine pulse with a quick decay envelope.
    pub fn play(&self) {
        if let Some(ctx) = &self.ctx {
            if let Err(err) = play_tone(ctx) {
                warn!("Blip playback failed: {:?}", err);
            }
        }
    }

    /// Release the output device at session end.
    pub fn close(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.close();
        }
    }
}

impl Default for BlipPlayer {
    fn default() -> Self {
        Self::new()
    }
}

fn play_tone(ctx: &AudioContext) -> Result<(), JsValue> {
    let oscillator = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;
    let now = ctx.current_time();

    oscillator.set_type(OscillatorType::Sine);
    oscillator.frequency().set_value_at_time(TONE_FREQ_HZ, now)?;

    gain.gain().set_value_at_time(TONE_PEAK_GAIN, now)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(TONE_FLOOR_GAIN, now + TONE_DECAY_SECS)?;

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    oscillator.start()?;
    oscillator.stop_with_when(now + TONE_DECAY_SECS)?;
    Ok(())
}
