use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pwlgen::types::Trace;

const TEST_PWL_DIR: &str = "pwlgen-test-out";

pub fn test_pwl_path(label: &str) -> String {
  let dir = std::env::temp_dir().join(TEST_PWL_DIR);
  format!("{}/{}", dir.display(), label)
}

/// A seeded white-noise record for feeding the estimator.
pub fn synthetic_trace(seed: u64, nsamples: usize, time_step: f64) -> Trace {
  let mut rng = StdRng::seed_from_u64(seed);
  let samples = (0..nsamples).map(|_| rng.gen_range(-1.0..1.0)).collect();
  Trace { samples, time_step }
}
