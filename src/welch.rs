use rayon::prelude::*;
use rustfft::num_complex::Complex;
use rustfft::{FftDirection, FftPlanner};
use std::f64::consts::PI;

use crate::spectrum::EmpiricalSpectrum;
use crate::types::{SampleBuffer, Trace};

/// Analysis window length used when the caller does not pick one.
pub const DEFAULT_SEGMENT_LEN: usize = 2400;

/// Nuttall window, the taper used on the measured dark-count records.
fn nuttall_window(n: usize) -> Vec<f64> {
  let m = (n - 1) as f64;
  (0..n)
    .map(|i| {
      let x = 2.0 * PI * i as f64 / m;
      0.3635819 - 0.4891775 * x.cos() + 0.1365995 * (2.0 * x).cos()
        - 0.0106411 * (3.0 * x).cos()
    })
    .collect()
}

/// Average overlapping windowed periodograms of one waveform.
///
/// Segments overlap by half the window length. Each segment has its mean
/// removed, is tapered, transformed, and accumulated as a one-sided power
/// density over normalized frequency. Classic variance reduction for a PSD
/// estimate from a finite noisy record.
pub fn averaged_periodogram(samples: &[f64], segment_len: usize) -> Result<SampleBuffer, String> {
  if segment_len < 2 {
    return Err(format!("Analysis window length must be at least 2, got {}", segment_len));
  }
  if samples.len() < segment_len {
    return Err(format!(
      "Waveform of {} samples is shorter than the analysis window of {}",
      samples.len(),
      segment_len
    ));
  }

  let window = nuttall_window(segment_len);
  let window_power: f64 = window.iter().map(|&w| w * w).sum();
  let step = segment_len - segment_len / 2;
  let n_bins = segment_len / 2 + 1;

  let mut planner = FftPlanner::new();
  let fft = planner.plan_fft(segment_len, FftDirection::Forward);

  let mut psd = vec![0.0; n_bins];
  let mut n_segments = 0usize;
  let mut start = 0usize;
  while start + segment_len <= samples.len() {
    let segment = &samples[start..start + segment_len];
    let mean: f64 = segment.iter().sum::<f64>() / segment_len as f64;

    let mut buffer: Vec<Complex<f64>> = segment
      .iter()
      .zip(window.iter())
      .map(|(&x, &w)| Complex::new((x - mean) * w, 0.0))
      .collect();
    fft.process(&mut buffer);

    for (k, slot) in psd.iter_mut().enumerate() {
      let mut power = buffer[k].norm_sqr() / window_power;
      // one-sided estimate folds the mirrored bins in
      if k != 0 && !(segment_len % 2 == 0 && k == segment_len / 2) {
        power *= 2.0;
      }
      *slot += power;
    }

    n_segments += 1;
    start += step;
  }

  for slot in psd.iter_mut() {
    *slot /= n_segments as f64;
  }
  Ok(psd)
}

/// Estimate one representative magnitude spectrum from measured waveforms.
///
/// Every record must share a time step; lengths may differ. Per-waveform
/// estimates run in parallel, then average into a single spectrum whose
/// frequency axis is converted to physical units via the shared time step.
/// The output carries magnitude (square root of power), ready to adapt into
/// the shaper.
pub fn estimate_spectrum(traces: &[Trace], segment_len: usize) -> Result<EmpiricalSpectrum, String> {
  let first = traces
    .first()
    .ok_or_else(|| "Spectral estimation requires at least one waveform".to_string())?;
  let time_step = first.time_step;
  if time_step <= 0.0 {
    return Err(format!("Time step must be positive, got {}", time_step));
  }
  for trace in traces.iter() {
    if (trace.time_step - time_step).abs() > 1e-9 * time_step {
      return Err(format!(
        "Inconsistent time steps across waveforms: {} vs {}",
        time_step, trace.time_step
      ));
    }
  }

  let estimates: Vec<SampleBuffer> = traces
    .par_iter()
    .map(|trace| averaged_periodogram(&trace.samples, segment_len))
    .collect::<Result<_, _>>()?;

  let n_bins = estimates[0].len();
  let mut averaged = vec![0.0; n_bins];
  for estimate in &estimates {
    for (slot, &power) in averaged.iter_mut().zip(estimate.iter()) {
      *slot += power;
    }
  }

  let n_traces = estimates.len() as f64;
  let frequencies = (0..n_bins)
    .map(|k| k as f64 / segment_len as f64 / time_step)
    .collect();
  let magnitudes = averaged.iter().map(|&p| (p / n_traces).sqrt()).collect();

  EmpiricalSpectrum::new(frequencies, magnitudes)
}
