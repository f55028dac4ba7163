//! Sound cues
//!
//! Each cue is synthesized once with fundsp when the output opens, then
//! replayed from memory through a detached rodio sink.

use fundsp::prelude::*;
use rodio::{OutputStream, OutputStreamHandle, Sink, buffer::SamplesBuffer};

use crate::driver::Cue;

const SAMPLE_RATE: u32 = 44_100;

/// Render `seconds` of a mono generator
fn render(mut node: impl AudioUnit, seconds: f64) -> Vec<f32> {
    node.set_sample_rate(SAMPLE_RATE as f64);
    let n = (seconds * SAMPLE_RATE as f64) as usize;
    (0..n).map(|_| node.get_mono()).collect()
}

/// Linear ramp from `a` to `b` over `dur` seconds, then held
fn ramp(a: f32, b: f32, dur: f32, t: f32) -> f32 {
    a + (b - a) * (t / dur).min(1.0)
}

fn flap() -> Vec<f32> {
    let freq = lfo(|t: f32| ramp(300.0, 700.0, 0.08, t));
    let gain = lfo(|t: f32| ramp(0.2, 0.0, 0.1, t));
    render((freq >> sine::<f32>()) * gain, 0.1)
}

fn score() -> Vec<f32> {
    let gain = lfo(|t: f32| 0.12 * (-t * 15.0).exp());
    render((sine_hz::<f32>(880.0) + sine_hz::<f32>(1320.0)) * gain, 0.25)
}

fn crash() -> Vec<f32> {
    // 400Hz down to 80Hz over 0.4s, fading out over 0.5s
    let freq = lfo(|t: f32| ramp(400.0, 80.0, 0.4, t));
    let gain = lfo(|t: f32| ramp(0.15, 0.0, 0.5, t));
    render((freq >> saw()) * gain, 0.5)
}

fn beat() -> Vec<f32> {
    let gain = lfo(|t: f32| if t < 0.12 { 0.15 } else { 0.0 });
    render(sine_hz::<f32>(440.0) * gain, 0.15)
}

struct Samples {
    flap: Vec<f32>,
    score: Vec<f32>,
    crash: Vec<f32>,
    beat: Vec<f32>,
}

impl Samples {
    fn synthesize() -> Self {
        Self {
            flap: flap(),
            score: score(),
            crash: crash(),
            beat: beat(),
        }
    }

    fn get(&self, cue: Cue) -> &[f32] {
        match cue {
            Cue::Flap => &self.flap,
            Cue::Score => &self.score,
            Cue::Crash => &self.crash,
            Cue::Beat => &self.beat,
        }
    }
}

pub struct Sfx {
    // Dropping the stream stops all output
    _stream: OutputStream,
    handle: OutputStreamHandle,
    samples: Samples,
}

impl Sfx {
    /// `None` when there is no usable output device
    pub fn open() -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                log::info!("Audio output opened");
                Some(Self {
                    _stream: stream,
                    handle,
                    samples: Samples::synthesize(),
                })
            }
            Err(e) => {
                log::warn!("No audio output ({e}) - sound disabled");
                None
            }
        }
    }

    pub fn play(&self, cue: Cue) {
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(e) => {
                log::warn!("Cannot play {cue:?}: {e}");
                return;
            }
        };
        let samples = self.samples.get(cue).to_vec();
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
        sink.detach(); // Play in background
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_holds_after_duration() {
        assert_eq!(ramp(0.0, 10.0, 1.0, 0.5), 5.0);
        assert_eq!(ramp(0.0, 10.0, 1.0, 3.0), 10.0);
    }

    #[test]
    fn cues_have_the_expected_length() {
        let samples = Samples::synthesize();
        assert_eq!(samples.get(Cue::Crash).len(), 22_050);
        assert_eq!(samples.get(Cue::Flap).len(), 4_410);
        assert!(samples.get(Cue::Score).iter().all(|s| s.abs() <= 1.0));
    }
}
