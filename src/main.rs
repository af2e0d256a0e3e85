use std::env;
use std::process;
use std::str::FromStr;

use rand::{thread_rng, Rng};

use pwlgen::color::NoiseColor;
use pwlgen::job::{self, Request};
use pwlgen::types::Breakpoints;
use pwlgen::{colored_noise_breakpoints, measured_noise_breakpoints, spike_breakpoints};
use pwlgen::{files, render, scope, welch};

const USAGE: &str = r#"Usage:
  pwlgen color    --col <name> --min <v> --max <v> --dur <s> --step <s> [--out <dir>] [--wav]
  pwlgen measured --dir <scope-csv-dir> --min <v> --max <v> --dur <s> --step <s> [--seg <n>] [--out <dir>] [--wav]
  pwlgen spikes   --dur <s> --amp <v> [--wid <s>] [--num <n>] [--out <dir>]
  pwlgen job      <job.json>

Writes PWL files (time and voltage columns) for use as SPICE piecewise-linear sources.
Example: pwlgen color --col white --min -1 --max 1 --dur 1 --step 1e-3"#;

fn main() {
  let args: Vec<String> = env::args().collect();
  if args.len() < 2 {
    eprintln!("{}", USAGE);
    process::exit(1);
  }

  let result = match args[1].as_str() {
    "color" => run_color(&args[2..]),
    "measured" => run_measured(&args[2..]),
    "spikes" => run_spikes(&args[2..]),
    "job" => run_job(&args[2..]),
    other => Err(format!("Unknown command '{}'\n{}", other, USAGE)),
  };

  if let Err(msg) = result {
    eprintln!("{}", msg);
    process::exit(1);
  }
}

fn flag_value(args: &[String], name: &str) -> Option<String> {
  args
    .iter()
    .position(|arg| arg == name)
    .and_then(|i| args.get(i + 1))
    .cloned()
}

fn has_flag(args: &[String], name: &str) -> bool {
  args.iter().any(|arg| arg == name)
}

fn required<T: FromStr>(args: &[String], name: &str) -> Result<T, String> {
  let raw = flag_value(args, name).ok_or_else(|| format!("Missing required flag {}\n{}", name, USAGE))?;
  raw.parse().map_err(|_| format!("Bad value '{}' for flag {}", raw, name))
}

fn optional<T: FromStr>(args: &[String], name: &str) -> Result<Option<T>, String> {
  match flag_value(args, name) {
    None => Ok(None),
    Some(raw) => raw
      .parse()
      .map(Some)
      .map_err(|_| format!("Bad value '{}' for flag {}", raw, name)),
  }
}

fn out_dir(args: &[String]) -> String {
  flag_value(args, "--out").unwrap_or_else(|| files::OUT_DIR.to_string())
}

fn emit(breakpoints: &Breakpoints, out: &str, stem: &str) -> Result<(), String> {
  let path = files::pwl_path(out, stem);
  render::write_pwl(breakpoints, &path)?;
  println!("{}", path);
  Ok(())
}

fn audition(breakpoints: &Breakpoints, time_step: f64, out: &str, stem: &str) -> Result<(), String> {
  let sample_rate = (1.0 / time_step).round() as usize;
  let path = format!("{}/{}.wav", out, stem);
  render::write_wav(sample_rate, &breakpoints.values, &path)?;
  println!("{}", path);
  Ok(())
}

fn run_color(args: &[String]) -> Result<(), String> {
  let color = NoiseColor::from_name(&required::<String>(args, "--col")?)?;
  let min = required(args, "--min")?;
  let max = required(args, "--max")?;
  let duration = required(args, "--dur")?;
  let time_step = required(args, "--step")?;
  let out = out_dir(args);

  let breakpoints =
    colored_noise_breakpoints(color, min, max, duration, time_step, &mut thread_rng())?;
  emit(&breakpoints, &out, color.name())?;
  if has_flag(args, "--wav") {
    audition(&breakpoints, time_step, &out, color.name())?;
  }
  Ok(())
}

fn run_measured(args: &[String]) -> Result<(), String> {
  let directory: String = required(args, "--dir")?;
  let min = required(args, "--min")?;
  let max = required(args, "--max")?;
  let duration = required(args, "--dur")?;
  let time_step = required(args, "--step")?;
  let segment_len = optional(args, "--seg")?.unwrap_or(welch::DEFAULT_SEGMENT_LEN);
  let out = out_dir(args);

  let traces = scope::read_scope_dir(&directory)?;
  println!("Estimating spectrum from {} scope records in {}", traces.len(), directory);

  let breakpoints = measured_noise_breakpoints(
    &traces, segment_len, min, max, duration, time_step, &mut thread_rng(),
  )?;
  emit(&breakpoints, &out, "measured")?;
  if has_flag(args, "--wav") {
    audition(&breakpoints, time_step, &out, "measured")?;
  }
  Ok(())
}

fn run_spikes(args: &[String]) -> Result<(), String> {
  let duration = required(args, "--dur")?;
  let amplitude = required(args, "--amp")?;
  let width = optional(args, "--wid")?.unwrap_or(1e-9);
  let count: usize =
    optional(args, "--num")?.unwrap_or_else(|| thread_rng().gen_range(50..=500));
  let out = out_dir(args);

  println!(
    "Generating PWL with {} spikes of width {} over a duration {} and max amplitude {}",
    count, width, duration, amplitude
  );

  let breakpoints = spike_breakpoints(duration, amplitude, width, count, &mut thread_rng())?;
  emit(&breakpoints, &out, "transient_spikes")
}

fn run_job(args: &[String]) -> Result<(), String> {
  let path = args.first().ok_or_else(|| format!("Missing job file path\n{}", USAGE))?;
  let batch = job::load_job_from_file(path)?;

  for request in &batch.requests {
    match request {
      Request::Color { color, min, max, duration, time_step } => {
        let color = NoiseColor::from_name(color)?;
        let breakpoints = colored_noise_breakpoints(
          color, *min, *max, *duration, *time_step, &mut thread_rng(),
        )?;
        emit(&breakpoints, &batch.out_dir, color.name())?;
      }
      Request::Measured { directory, min, max, duration, time_step, segment_len } => {
        let traces = scope::read_scope_dir(directory)?;
        let breakpoints = measured_noise_breakpoints(
          &traces, *segment_len, *min, *max, *duration, *time_step, &mut thread_rng(),
        )?;
        emit(&breakpoints, &batch.out_dir, "measured")?;
      }
      Request::Spikes { duration, amplitude, width, count } => {
        let count = count.unwrap_or_else(|| thread_rng().gen_range(50..=500));
        let breakpoints =
          spike_breakpoints(*duration, *amplitude, *width, count, &mut thread_rng())?;
        emit(&breakpoints, &batch.out_dir, "transient_spikes")?;
      }
    }
  }
  Ok(())
}
