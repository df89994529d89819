//! Eat feedback using Web Audio API
//!
//! Plays `sounds/nom.mp3` when it loads, otherwise synthesizes a quick
//! "num num num" of three plucked notes. Every failure here is swallowed;
//! sound never affects the game.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{AudioContext, BiquadFilterType, HtmlAudioElement, OscillatorType};

const EAT_SOUND_URL: &str = "sounds/nom.mp3";

/// (start offset s, frequency Hz) for the fallback melody
const NUM_NUM_NUM: [(f64, f32); 3] = [(0.0, 740.0), (0.16, 880.0), (0.32, 740.0)];
const PLUCK_SECS: f64 = 0.12;

/// Audio manager for the game
pub struct AudioManager {
    sample: Option<HtmlAudioElement>,
    /// Cleared by the element's error event when the file is missing
    sample_ok: Rc<Cell<bool>>,
    /// Created lazily on first synthesized sound
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        let sample_ok = Rc::new(Cell::new(true));
        let sample = HtmlAudioElement::new_with_src(EAT_SOUND_URL).ok();
        match &sample {
            Some(el) => {
                let flag = sample_ok.clone();
                let on_error = Closure::<dyn FnMut()>::new(move || {
                    log::warn!("{} unavailable, using synthesized eat sound", EAT_SOUND_URL);
                    flag.set(false);
                });
                let _ = el
                    .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
                on_error.forget();
            }
            None => sample_ok.set(false),
        }
        Self {
            sample,
            sample_ok,
            ctx: None,
            volume: 0.8,
        }
    }

    /// Set volume (0.0 - 1.0); zero mutes
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Hook called on every successful hit
    pub fn play_eat(&mut self) {
        if self.volume <= 0.0 {
            return;
        }
        if self.sample_ok.get() {
            if let Some(el) = &self.sample {
                el.set_volume(self.volume as f64);
                el.set_current_time(0.0);
                if el.play().is_ok() {
                    return;
                }
            }
        }
        if self.synth_num_num_num().is_none() {
            log::warn!("Audio not available");
        }
    }

    fn context(&mut self) -> Option<&AudioContext> {
        if self.ctx.is_none() {
            self.ctx = AudioContext::new().ok();
        }
        self.ctx.as_ref()
    }

    fn synth_num_num_num(&mut self) -> Option<()> {
        let vol = self.volume;
        let ctx = self.context()?.clone();
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        let now = ctx.current_time();
        for (offset, freq) in NUM_NUM_NUM {
            pluck(&ctx, now + offset, freq, vol)?;
        }
        Some(())
    }
}

/// Triangle pluck with a short pitch drop, through a warm lowpass
fn pluck(ctx: &AudioContext, t: f64, freq: f32, vol: f32) -> Option<()> {
    let osc = ctx.create_oscillator().ok()?;
    let filter = ctx.create_biquad_filter().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(OscillatorType::Triangle);
    let _ = osc.frequency().set_value_at_time(freq * 1.1, t);
    let _ = osc.frequency().exponential_ramp_to_value_at_time(freq, t + 0.02);

    filter.set_type(BiquadFilterType::Lowpass);
    let _ = filter.frequency().set_value_at_time(1200.0, t);
    let _ = filter.q().set_value_at_time(1.0, t);

    let g = gain.gain();
    let _ = g.set_value_at_time(0.0001, t);
    let _ = g.linear_ramp_to_value_at_time(0.28 * vol, t + 0.01);
    let _ = g.exponential_ramp_to_value_at_time(0.0001, t + PLUCK_SECS);

    osc.connect_with_audio_node(&filter).ok()?;
    filter.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    osc.start_with_when(t).ok()?;
    osc.stop_with_when(t + PLUCK_SECS + 0.03).ok()?;
    Some(())
}
