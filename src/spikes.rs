use rand::Rng;

use crate::render::weave;
use crate::types::{Breakpoints, Seconds, Volts};

/// Build `count` non-overlapping triangular pulses at random positions over
/// the duration, each rising from 0 to a random level in
/// [-amplitude, +amplitude] and back to 0 within `width`.
///
/// Starts are drawn uniformly over [0, duration - width * count] and sorted,
/// then the i-th start is shifted by i * width. Sorting before the shift is
/// what keeps the spaced starts in order, so consecutive pulses are at least
/// one width apart and can never collide.
pub fn transient_spikes<R>(
  duration: Seconds,
  amplitude: Volts,
  width: Seconds,
  count: usize,
  rng: &mut R,
) -> Result<Breakpoints, String>
where
  R: Rng + ?Sized,
{
  if duration <= 0.0 || width <= 0.0 {
    return Err(format!(
      "Duration and pulse width must be positive. Got duration {} and width {}",
      duration, width
    ));
  }
  if amplitude <= 0.0 {
    return Err(format!("Max amplitude must be positive, got {}", amplitude));
  }

  let span = duration - width * count as f64;
  if span <= 0.0 {
    return Err(format!(
      "Insufficient duration for {} spikes of width {}: {} * {} leaves no room in {}",
      count, width, count, width, duration
    ));
  }

  let mut starts: Vec<f64> = (0..count).map(|_| rng.gen_range(0.0..span)).collect();
  starts.sort_by(|a, b| a.partial_cmp(b).unwrap());
  for (i, start) in starts.iter_mut().enumerate() {
    *start += width * i as f64;
  }

  let mids: Vec<f64> = starts.iter().map(|&s| s + width / 2.0).collect();
  let ends: Vec<f64> = mids.iter().map(|&m| m + width / 2.0).collect();

  let zeros = vec![0.0; count];
  let amplitudes: Vec<f64> =
    (0..count).map(|_| rng.gen_range(-amplitude..amplitude)).collect();

  let times = weave(&[&starts, &mids, &ends])?;
  let values = weave(&[&zeros, &amplitudes, &zeros])?;

  Ok(Breakpoints { times, values })
}

#[cfg(test)]
mod tests {
  use super::*;
  use itertools::Itertools;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn test_times_are_chronological_and_values_bounded() {
    for seed in 0..8 {
      let mut rng = StdRng::seed_from_u64(seed);
      let breakpoints = transient_spikes(1.0, 5.0, 1e-6, 200, &mut rng).unwrap();

      assert_eq!(breakpoints.len(), 600);
      assert!(breakpoints.is_chronological(), "Seed {} produced out-of-order times", seed);
      for &v in &breakpoints.values {
        assert!(v.abs() <= 5.0, "Seed {} produced value {} outside [-5, 5]", seed, v);
      }
    }
  }

  #[test]
  fn test_pulses_never_overlap() {
    for seed in 0..8 {
      let mut rng = StdRng::seed_from_u64(seed);
      let breakpoints = transient_spikes(1.0, 1.0, 1e-4, 500, &mut rng).unwrap();

      // each pulse is a (start, mid, end) triple; an end may not pass the
      // next pulse's start
      for (a, b) in breakpoints.times.chunks(3).tuple_windows() {
        assert!(a[2] <= b[0], "Seed {}: pulse ending {} overlaps start {}", seed, a[2], b[0]);
      }
    }
  }

  #[test]
  fn test_five_disjoint_pulses() {
    let mut rng = StdRng::seed_from_u64(42);
    let breakpoints = transient_spikes(10.0, 2.0, 0.01, 5, &mut rng).unwrap();
    assert_eq!(breakpoints.len(), 15);

    let mut previous_end = f64::NEG_INFINITY;
    for (times, values) in breakpoints.times.chunks(3).zip(breakpoints.values.chunks(3)) {
      assert!((times[2] - times[0] - 0.01).abs() < 1e-12, "Pulse must span one width");
      assert!(times[0] > previous_end, "Pulse intervals must be disjoint and increasing");
      previous_end = times[2];

      assert_eq!(values[0], 0.0);
      assert_eq!(values[2], 0.0);
      assert!(values[1] != 0.0, "Peak must be nonzero");
    }
  }

  #[test]
  fn test_insufficient_duration_is_reported() {
    let mut rng = StdRng::seed_from_u64(1);
    let result = transient_spikes(1.0, 1.0, 0.1, 20, &mut rng);
    assert!(result.is_err(), "20 pulses of width 0.1 cannot fit in 1 second");

    let err = result.unwrap_err();
    assert!(err.contains("Insufficient duration"), "Got unexpected message: {}", err);
  }

  #[test]
  fn test_invalid_parameters_are_rejected() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(transient_spikes(0.0, 1.0, 1e-9, 10, &mut rng).is_err());
    assert!(transient_spikes(1.0, 0.0, 1e-9, 10, &mut rng).is_err());
    assert!(transient_spikes(1.0, 1.0, 0.0, 10, &mut rng).is_err());
  }
}
