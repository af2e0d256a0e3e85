use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::spectrum::Spectrum;

/// The supported noise colors, each a closed-form magnitude spectrum over
/// normalized frequency. The 1/f family treats DC as zero magnitude so the
/// singular bin never reaches the shaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseColor {
  White,
  Blue,
  Violet,
  Brownian,
  Pink,
  BabyPink,
}

use NoiseColor::*;

pub const ALL_COLORS: [NoiseColor; 6] = [White, Blue, Violet, Brownian, Pink, BabyPink];

static COLORS: Lazy<HashMap<&'static str, NoiseColor>> = Lazy::new(|| {
  ALL_COLORS.iter().map(|&color| (color.name(), color)).collect()
});

impl NoiseColor {
  pub fn name(&self) -> &'static str {
    match self {
      White => "white",
      Blue => "blue",
      Violet => "violet",
      Brownian => "brownian",
      Pink => "pink",
      BabyPink => "baby_pink",
    }
  }

  /// Case-insensitive lookup by name.
  pub fn from_name(name: &str) -> Result<NoiseColor, String> {
    COLORS.get(name.to_lowercase().as_str()).copied().ok_or_else(|| {
      let supported: Vec<&str> = ALL_COLORS.iter().map(|c| c.name()).collect();
      format!("Unsupported color '{}'. Supported colors: {}", name, supported.join(", "))
    })
  }
}

impl Spectrum for NoiseColor {
  fn magnitude(&self, f: f64) -> f64 {
    match self {
      White => 1.0,
      Blue => f.sqrt(),
      Violet => f,
      Brownian => {
        if f == 0.0 {
          0.0
        } else {
          1.0 / f
        }
      }
      Pink => {
        if f == 0.0 {
          0.0
        } else {
          1.0 / f.sqrt()
        }
      }
      BabyPink => {
        if f == 0.0 {
          0.0
        } else {
          1.0 / f.cbrt()
        }
      }
    }
  }
}
