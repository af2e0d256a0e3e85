use serde::{Deserialize, Serialize};
use std::fs;

use crate::files;
use crate::welch;

fn default_out_dir() -> String {
  files::OUT_DIR.to_string()
}

fn default_width() -> f64 {
  1e-9
}

fn default_segment_len() -> usize {
  welch::DEFAULT_SEGMENT_LEN
}

/// One generation request. `spikes` may omit `count`; the binary draws the
/// default (uniform in [50, 500]) before the core is invoked, which always
/// takes an explicit count.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Request {
  Color {
    color: String,
    min: f64,
    max: f64,
    duration: f64,
    time_step: f64,
  },
  Measured {
    directory: String,
    min: f64,
    max: f64,
    duration: f64,
    time_step: f64,
    #[serde(default = "default_segment_len")]
    segment_len: usize,
  },
  Spikes {
    duration: f64,
    amplitude: f64,
    #[serde(default = "default_width")]
    width: f64,
    #[serde(default)]
    count: Option<usize>,
  },
}

/// A batch of generation requests sharing one output directory.
#[derive(Debug, Serialize, Deserialize)]
pub struct Job {
  #[serde(default = "default_out_dir")]
  pub out_dir: String,
  pub requests: Vec<Request>,
}

pub fn load_job_from_file(filepath: &str) -> Result<Job, String> {
  let contents = fs::read_to_string(filepath)
    .map_err(|e| format!("Failed to open job file '{}': {}", filepath, e))?;
  serde_json::from_str(&contents)
    .map_err(|e| format!("Failed to parse job file '{}': {}", filepath, e))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_each_request_kind() {
    let raw = r#"{
      "out_dir": "out/pwl",
      "requests": [
        {"kind": "color", "color": "pink", "min": -1.0, "max": 1.0, "duration": 1.0, "time_step": 1e-3},
        {"kind": "measured", "directory": "scope", "min": -0.5, "max": 0.5, "duration": 2.0, "time_step": 1e-6},
        {"kind": "spikes", "duration": 1.0, "amplitude": 5.0, "count": 100}
      ]
    }"#;

    let job: Job = serde_json::from_str(raw).unwrap();
    assert_eq!(job.out_dir, "out/pwl");
    assert_eq!(job.requests.len(), 3);

    match &job.requests[1] {
      Request::Measured { segment_len, .. } => {
        assert_eq!(*segment_len, welch::DEFAULT_SEGMENT_LEN)
      }
      other => panic!("Expected a measured request, got {:?}", other),
    }
  }

  #[test]
  fn test_spike_defaults() {
    let raw = r#"{
      "requests": [{"kind": "spikes", "duration": 1.0, "amplitude": 2.0}]
    }"#;

    let job: Job = serde_json::from_str(raw).unwrap();
    assert_eq!(job.out_dir, files::OUT_DIR);
    match &job.requests[0] {
      Request::Spikes { width, count, .. } => {
        assert_eq!(*width, 1e-9);
        assert!(count.is_none(), "Count stays open until the caller decides");
      }
      other => panic!("Expected a spikes request, got {:?}", other),
    }
  }

  #[test]
  fn test_missing_job_file_is_reported() {
    let err = load_job_from_file("/no/such/job.json").unwrap_err();
    assert!(err.contains("job.json"), "Got unexpected message: {}", err);
  }
}
