use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::files;
use crate::types::{Breakpoints, SampleBuffer, Seconds};

/// Affine rescale so the buffer minimum maps to `min` and the maximum to
/// `max`. A flat buffer has no defined rescale and is reported rather than
/// returned as NaN.
pub fn normalize_to_range(values: &[f64], min: f64, max: f64) -> Result<SampleBuffer, String> {
  if min >= max {
    return Err(format!(
      "Normalization target must satisfy min < max, got [{}, {}]",
      min, max
    ));
  }

  let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
  let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

  if values.is_empty() || lo == hi {
    return Err(format!(
      "Cannot normalize a zero-range buffer (min {} == max {}) into [{}, {}]",
      lo, hi, min, max
    ));
  }

  Ok(
    values
      .iter()
      .map(|&v| (max - min) * (v - lo) / (hi - lo) + min)
      .collect(),
  )
}

/// Interleave equal-length buffers position-wise into one buffer of length
/// N * original length. weave([1,3,5], [2,4,6]) = [1,2,3,4,5,6]. Used to
/// collapse concurrent per-event coordinate streams into one chronological
/// stream.
pub fn weave(arrs: &[&[f64]]) -> Result<SampleBuffer, String> {
  let num_arrs = arrs.len();
  if num_arrs == 0 {
    return Ok(Vec::new());
  }

  let arr_length = arrs[0].len();
  if let Some(mismatch) = arrs.iter().find(|a| a.len() != arr_length) {
    return Err(format!(
      "All buffers must have the same length to be woven together. Got {} and {}",
      arr_length,
      mismatch.len()
    ));
  }

  let mut woven = vec![0.0; num_arrs * arr_length];
  for (i, arr) in arrs.iter().enumerate() {
    for (j, &v) in arr.iter().enumerate() {
      woven[j * num_arrs + i] = v;
    }
  }
  Ok(woven)
}

/// Uniform sample times 0, dt, 2dt, ... spanning the duration.
pub fn time_grid(duration: Seconds, time_step: Seconds) -> Result<SampleBuffer, String> {
  if duration <= 0.0 || time_step <= 0.0 {
    return Err(format!(
      "Duration and time step must be positive. Got duration {} and step {}",
      duration, time_step
    ));
  }
  let nsamples = (duration / time_step) as usize;
  if nsamples == 0 {
    return Err(format!(
      "Duration {} is shorter than one time step {}",
      duration, time_step
    ));
  }
  Ok((0..nsamples).map(|i| i as f64 * time_step).collect())
}

/// Write breakpoints as a PWL file: two columns per line, time first, in
/// chronological order. This is the format SPICE piecewise-linear sources
/// consume.
pub fn write_pwl(breakpoints: &Breakpoints, file_name: &str) -> Result<(), String> {
  files::with_dir(file_name);
  let file = fs::File::create(Path::new(file_name))
    .map_err(|e| format!("Failed to create PWL file '{}': {}", file_name, e))?;
  let mut writer = BufWriter::new(file);

  for (time, value) in breakpoints.iter() {
    writeln!(writer, "{:.12e} {:.12e}", time, value)
      .map_err(|e| format!("Failed to write PWL file '{}': {}", file_name, e))?;
  }
  writer
    .flush()
    .map_err(|e| format!("Failed to flush PWL file '{}': {}", file_name, e))
}

/// Audition path: engrave a sample buffer as a mono float WAV so a generated
/// waveform can be eyeballed or listened to in an editor.
pub fn write_wav(sample_rate: usize, samples: &[f64], file_name: &str) -> Result<(), String> {
  files::with_dir(file_name);
  let spec = hound::WavSpec {
    channels: 1,
    sample_rate: sample_rate as u32,
    bits_per_sample: 32,
    sample_format: hound::SampleFormat::Float,
  };
  let mut writer = hound::WavWriter::create(Path::new(file_name), spec)
    .map_err(|e| format!("Failed to create WAV file '{}': {}", file_name, e))?;
  for &sample in samples {
    writer
      .write_sample(sample as f32)
      .map_err(|e| format!("Failed to write WAV file '{}': {}", file_name, e))?;
  }
  writer
    .finalize()
    .map_err(|e| format!("Failed to finalize WAV file '{}': {}", file_name, e))
}
