pub type Seconds = f64;
pub type Volts = f64;
pub type Hz = f64;

/// Uniformly time-stepped sample values
pub type SampleBuffer = Vec<f64>;

/// One vertex of a piecewise-linear waveform
pub type Breakpoint = (Seconds, Volts);

/// A measured record with its acquisition time step
#[derive(Debug, Clone)]
pub struct Trace {
  pub samples: SampleBuffer,
  pub time_step: Seconds,
}

/// Terminal artifact of every generation path. Times are non-decreasing;
/// the emitter writes them out in order, one breakpoint per line.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoints {
  pub times: SampleBuffer,
  pub values: SampleBuffer,
}

impl Breakpoints {
  pub fn len(&self) -> usize {
    self.times.len()
  }

  pub fn is_empty(&self) -> bool {
    self.times.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = Breakpoint> + '_ {
    self.times.iter().copied().zip(self.values.iter().copied())
  }

  pub fn is_chronological(&self) -> bool {
    self.times.windows(2).all(|w| w[0] <= w[1])
  }
}
