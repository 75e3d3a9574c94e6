use crate::util::LossyLines;
use regex::Regex;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;
use tracing::warn;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d*\.?\d+").expect("number pattern"));

const END_TIME_TOKEN: &str = "endTime";

/// Configured end iteration of a control dictionary, `0.0` when it has none
/// or cannot be read.
pub fn parse_end_iteration(control_dict: &Path) -> f64 {
    let file = match File::open(control_dict) {
        Ok(f) => f,
        Err(err) => {
            warn!("error reading {}: {err}", control_dict.display());
            return 0.0;
        }
    };

    match end_iteration_from_reader(BufReader::new(file)) {
        Ok(v) => v,
        Err(err) => {
            warn!("error reading {}: {err}", control_dict.display());
            0.0
        }
    }
}

/// First line mentioning `endTime` that carries a number wins; later ones are
/// ignored.
pub fn end_iteration_from_reader<R: BufRead>(reader: R) -> std::io::Result<f64> {
    for line in LossyLines::new(reader) {
        let line = line?;
        if !line.contains(END_TIME_TOKEN) {
            continue;
        }
        if let Some(m) = NUMBER.find(&line) {
            let value = m.as_str().parse::<f64>().unwrap_or(0.0);
            return Ok(if value.is_finite() { value.max(0.0) } else { 0.0 });
        }
    }
    Ok(0.0)
}

/// Highest numerically named subdirectory directly inside `case_dir`.
pub fn last_iteration(case_dir: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(case_dir) else {
        return 0;
    };

    entries
        .flatten()
        .filter(|e| e.path().is_dir())
        .filter_map(|e| iteration_number(e.file_name().to_str()?))
        .max()
        .unwrap_or(0)
}

fn iteration_number(name: &str) -> Option<u64> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}
