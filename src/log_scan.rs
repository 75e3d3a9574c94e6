use crate::{status::Status, util::LossyLines};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("integer pattern"));

const CONVERGED: &str = "SIMPLE solution converged in";
const FINALISED: &str = "Finalising parallel run";
const CRASH_MARKERS: [&str; 4] = [
    "job aborted:",
    "simpleFoam ended prematurely and may have crashed",
    "[0] process exited without calling finalize",
    "---- error analysis ----",
];

/// What a single log line does to the running verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineVerdict {
    /// Settles the status; nothing later in the log matters.
    Final(Status),
    /// Crash marker; a later terminal line can still override it.
    Tentative(Status),
    Nothing,
}

pub fn classify_line(line: &str, mesh_crash_threshold: u64) -> LineVerdict {
    if line.contains(CONVERGED) {
        return match FIRST_INTEGER.find(line) {
            // Digits only, so a parse failure means the count overflowed.
            Some(m) => match m.as_str().parse::<u64>() {
                Ok(n) if n < mesh_crash_threshold => LineVerdict::Final(Status::MeshCrashed),
                _ => LineVerdict::Final(Status::Converged),
            },
            None => LineVerdict::Nothing,
        };
    }
    if CRASH_MARKERS.iter().any(|m| line.contains(m)) {
        return LineVerdict::Tentative(Status::Crashed);
    }
    if line.contains(FINALISED) {
        return LineVerdict::Final(Status::Completed);
    }
    LineVerdict::Nothing
}

/// Walk log lines in order, starting from the progress-derived `status`.
pub fn classify_lines<R: BufRead>(
    reader: R,
    status: Status,
    mesh_crash_threshold: u64,
) -> std::io::Result<Status> {
    let mut current = status;
    for line in LossyLines::new(reader) {
        match classify_line(&line?, mesh_crash_threshold) {
            LineVerdict::Final(s) => return Ok(s),
            LineVerdict::Tentative(s) => current = s,
            LineVerdict::Nothing => {}
        }
    }
    Ok(current)
}

/// Refine `status` with the solver log at `log_path`, if there is one.
pub fn refine_status(log_path: &Path, status: Status, mesh_crash_threshold: u64) -> Status {
    if !log_path.is_file() {
        return status;
    }

    let scanned = File::open(log_path)
        .and_then(|f| classify_lines(BufReader::new(f), status, mesh_crash_threshold));
    settle(log_path, status, scanned)
}

/// An unreadable log, even one that failed halfway, leaves `status` as is.
fn settle(log_path: &Path, status: Status, scanned: std::io::Result<Status>) -> Status {
    match scanned {
        Ok(refined) => {
            if refined != status {
                debug!("{}: {status:?} -> {refined:?}", log_path.display());
            }
            refined
        }
        Err(err) => {
            warn!("error reading logfile {}: {err}", log_path.display());
            status
        }
    }
}
