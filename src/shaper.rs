use rand::Rng;
use rand_distr::{Distribution, Normal};
use rustfft::num_complex::Complex;
use rustfft::{FftDirection, FftPlanner};

use crate::spectrum::Spectrum;
use crate::types::SampleBuffer;

/// Filter white noise in the frequency domain so its power spectrum follows
/// the target shape.
///
/// Draws `n` standard normal samples, transforms them, scales each bin by
/// the target magnitude evaluated at that bin's normalized frequency, and
/// transforms back. The magnitude array is normalized to unit RMS over the
/// half spectrum first, so the shape of the target controls the spectrum
/// while the white noise energy fixes the absolute power. Bins above n/2
/// reuse the mirrored magnitude, keeping the spectrum conjugate symmetric
/// and the output real.
///
/// Callers wanting reproducible output pass a seeded rng.
pub fn shaped_noise<S, R>(n: usize, spectrum: &S, rng: &mut R) -> Result<SampleBuffer, String>
where
  S: Spectrum + ?Sized,
  R: Rng + ?Sized,
{
  if n == 0 {
    return Err("Cannot shape a zero-length sample buffer".to_string());
  }

  let normal = Normal::new(0.0, 1.0).map_err(|e| e.to_string())?;
  let mut buffer: Vec<Complex<f64>> =
    (0..n).map(|_| Complex::new(normal.sample(rng), 0.0)).collect();

  let mut planner = FftPlanner::new();
  let forward = planner.plan_fft(n, FftDirection::Forward);
  forward.process(&mut buffer);

  let half_freqs: Vec<f64> = (0..=n / 2).map(|k| k as f64 / n as f64).collect();
  let magnitudes = spectrum.evaluate(&half_freqs);

  let mean_square: f64 =
    magnitudes.iter().map(|&m| m * m).sum::<f64>() / magnitudes.len() as f64;
  let rms = mean_square.sqrt();
  if !rms.is_finite() {
    return Err("Magnitude spectrum evaluated to a non-finite value".to_string());
  }
  if rms == 0.0 {
    return Err(
      "Magnitude spectrum is zero at every queried frequency; nothing to shape".to_string(),
    );
  }

  for (k, bin) in buffer.iter_mut().enumerate() {
    let idx = if k <= n / 2 { k } else { n - k };
    *bin *= magnitudes[idx] / rms;
  }

  let inverse = planner.plan_fft(n, FftDirection::Inverse);
  inverse.process(&mut buffer);

  // rustfft leaves the inverse unnormalized
  Ok(buffer.iter().map(|c| c.re / n as f64).collect())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::color::{NoiseColor, ALL_COLORS};
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use crate::spectrum::EmpiricalSpectrum;

  #[test]
  fn test_output_length_matches_request_for_all_colors() {
    let mut rng = StdRng::seed_from_u64(7);
    for color in ALL_COLORS {
      for n in [16, 1000, 2401] {
        let samples = shaped_noise(n, &color, &mut rng).unwrap();
        assert_eq!(samples.len(), n, "Color {} must produce {} samples", color.name(), n);
      }
    }
  }

  #[test]
  fn test_shaped_output_is_not_constant() {
    let mut rng = StdRng::seed_from_u64(11);
    let samples = shaped_noise(4096, &NoiseColor::White, &mut rng).unwrap();
    let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert!(max > min, "White noise must have nonzero range");
  }

  #[test]
  fn test_dc_free_shapes_have_zero_mean() {
    // brownian substitutes magnitude 0 at f = 0, which zeroes the DC bin
    let mut rng = StdRng::seed_from_u64(13);
    let samples = shaped_noise(2048, &NoiseColor::Brownian, &mut rng).unwrap();
    let mean: f64 = samples.iter().sum::<f64>() / samples.len() as f64;
    assert!(mean.abs() < 1e-9, "DC-free noise must average to zero, got {}", mean);
  }

  #[test]
  fn test_seeded_generation_is_reproducible() {
    let a = shaped_noise(512, &NoiseColor::Pink, &mut StdRng::seed_from_u64(99)).unwrap();
    let b = shaped_noise(512, &NoiseColor::Pink, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn test_zero_spectrum_is_rejected() {
    // empirical support far above anything a 1.0s time step can query
    let spectrum = EmpiricalSpectrum::new(vec![1e6, 2e6], vec![1.0, 1.0])
      .unwrap()
      .at_time_step(1.0);
    let result = shaped_noise(256, &spectrum, &mut StdRng::seed_from_u64(5));
    assert!(result.is_err(), "An everywhere-zero spectrum must be reported");
  }

  #[test]
  fn test_zero_length_is_rejected() {
    let result = shaped_noise(0, &NoiseColor::White, &mut StdRng::seed_from_u64(5));
    assert!(result.is_err());
  }
}
