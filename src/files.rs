use std::fs;
use std::path::Path;

/// Default directory for emitted PWL files, relative to the working dir.
pub const OUT_DIR: &str = "pwl";

/// Ensure the directory for a path exists, creating it if needed. Accepts
/// either a directory or a file path; for a file path the parent is created.
pub fn with_dir(path: &str) {
  let path = Path::new(path);

  let dir = if path.extension().is_some() {
    path.parent().unwrap_or_else(|| Path::new("/"))
  } else {
    path
  };

  if !dir.exists() {
    fs::create_dir_all(dir).expect("Failed to create directory");
  }
}

/// Join an output directory and a stem into a .pwl file path.
pub fn pwl_path(out_dir: &str, stem: &str) -> String {
  format!("{}/{}.pwl", out_dir, stem)
}
