use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{SampleBuffer, Trace};

/// Vendor preamble length on the scope's CSV exports.
const HEADER_LINES: usize = 18;
/// Comma-separated field positions for time and voltage.
const TIME_FIELD: usize = 3;
const VOLTAGE_FIELD: usize = 4;

/// Read one oscilloscope CSV export into a trace. The fixed-length preamble
/// is skipped and the time step is derived from the first two time samples.
pub fn read_scope_file(path: &Path) -> Result<Trace, String> {
  let contents = fs::read_to_string(path)
    .map_err(|e| format!("Failed to read scope file '{}': {}", path.display(), e))?;

  let mut times: SampleBuffer = Vec::new();
  let mut samples: SampleBuffer = Vec::new();
  for (line_number, line) in contents.lines().enumerate().skip(HEADER_LINES) {
    if line.trim().is_empty() {
      continue;
    }
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() <= VOLTAGE_FIELD {
      return Err(format!(
        "Malformed row in '{}' line {}: expected at least {} comma-separated fields, got {}",
        path.display(),
        line_number + 1,
        VOLTAGE_FIELD + 1,
        fields.len()
      ));
    }

    let time: f64 = fields[TIME_FIELD].trim().parse().map_err(|e| {
      format!("Bad time value in '{}' line {}: {}", path.display(), line_number + 1, e)
    })?;
    let voltage: f64 = fields[VOLTAGE_FIELD].trim().parse().map_err(|e| {
      format!("Bad voltage value in '{}' line {}: {}", path.display(), line_number + 1, e)
    })?;
    times.push(time);
    samples.push(voltage);
  }

  if times.len() < 2 {
    return Err(format!(
      "Scope file '{}' holds {} samples; need at least 2 to derive a time step",
      path.display(),
      times.len()
    ));
  }

  let time_step = times[1] - times[0];
  if time_step <= 0.0 {
    return Err(format!(
      "Scope file '{}' has a non-increasing time axis (step {})",
      path.display(),
      time_step
    ));
  }

  Ok(Trace { samples, time_step })
}

/// Read every CSV export in a directory, in name order.
pub fn read_scope_dir(dir: &str) -> Result<Vec<Trace>, String> {
  let entries = fs::read_dir(dir)
    .map_err(|e| format!("Failed to open scope directory '{}': {}", dir, e))?;

  let mut paths: Vec<PathBuf> = entries
    .filter_map(|entry| entry.ok().map(|e| e.path()))
    .filter(|path| {
      path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
    })
    .collect();
  paths.sort();

  if paths.is_empty() {
    return Err(format!("No CSV files found in scope directory '{}'", dir));
  }

  paths.iter().map(|path| read_scope_file(path)).collect()
}
