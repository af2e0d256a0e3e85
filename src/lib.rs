pub mod color;
pub mod files;
pub mod job;
pub mod render;
pub mod scope;
pub mod shaper;
pub mod spectrum;
pub mod spikes;
pub mod types;
pub mod welch;

use rand::Rng;

use crate::color::NoiseColor;
use crate::types::{Breakpoints, Trace};

/// Colored noise over a uniform time grid, rescaled into [min, max].
pub fn colored_noise_breakpoints<R: Rng + ?Sized>(
  color: NoiseColor,
  min: f64,
  max: f64,
  duration: f64,
  time_step: f64,
  rng: &mut R,
) -> Result<Breakpoints, String> {
  let times = render::time_grid(duration, time_step)?;
  let raw = shaper::shaped_noise(times.len(), &color, rng)?;
  let values = render::normalize_to_range(&raw, min, max)?;
  Ok(Breakpoints { times, values })
}

/// Noise spectrally matched to measured waveforms: estimate their averaged
/// spectrum, adapt it to the shaper, filter fresh white noise by it, and
/// rescale into [min, max].
pub fn measured_noise_breakpoints<R: Rng + ?Sized>(
  traces: &[Trace],
  segment_len: usize,
  min: f64,
  max: f64,
  duration: f64,
  time_step: f64,
  rng: &mut R,
) -> Result<Breakpoints, String> {
  let estimate = welch::estimate_spectrum(traces, segment_len)?;
  let spectrum = estimate.at_time_step(time_step);

  let times = render::time_grid(duration, time_step)?;
  let raw = shaper::shaped_noise(times.len(), &spectrum, rng)?;
  let values = render::normalize_to_range(&raw, min, max)?;
  Ok(Breakpoints { times, values })
}

/// Non-overlapping transient spikes across the duration.
pub fn spike_breakpoints<R: Rng + ?Sized>(
  duration: f64,
  amplitude: f64,
  width: f64,
  count: usize,
  rng: &mut R,
) -> Result<Breakpoints, String> {
  spikes::transient_spikes(duration, amplitude, width, count, rng)
}
