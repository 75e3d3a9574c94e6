use crate::{
    config::Config,
    locator::{self, Case},
    log_scan, progress,
    status::Status,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub case: Case,
    pub status: Status,
    pub progress: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Completed plus converged.
    pub completed: usize,
    pub crashed: usize,
    pub mesh_crashed: usize,
    pub converged: usize,
    pub not_started: usize,
    pub in_progress: usize,
}

/// Outcome of one analysis pass over a case tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Census {
    pub root: PathBuf,
    pub results: Vec<ClassificationResult>,
    pub by_status: BTreeMap<Status, Vec<PathBuf>>,
    pub counts: StatusCounts,
    pub total: usize,
    pub ratio: f64,
}

impl Census {
    pub fn from_results(root: &Path, results: Vec<ClassificationResult>) -> Self {
        let mut by_status: BTreeMap<Status, Vec<PathBuf>> = BTreeMap::new();
        for r in &results {
            by_status
                .entry(r.status)
                .or_default()
                .push(r.case.case_dir.clone());
        }

        let count = |s: Status| by_status.get(&s).map_or(0, Vec::len);
        let counts = StatusCounts {
            completed: results.iter().filter(|r| r.status.is_done()).count(),
            crashed: count(Status::Crashed),
            mesh_crashed: count(Status::MeshCrashed),
            converged: count(Status::Converged),
            not_started: count(Status::NotStarted),
            in_progress: count(Status::InProgress),
        };

        let total = results.len();
        let ratio = if total == 0 {
            0.0
        } else {
            counts.completed as f64 / total as f64
        };

        Self {
            root: root.to_path_buf(),
            results,
            by_status,
            counts,
            total,
            ratio,
        }
    }

    /// Case directories with `status`, in discovery order.
    pub fn cases_with(&self, status: Status) -> &[PathBuf] {
        self.by_status.get(&status).map(Vec::as_slice).unwrap_or(&[])
    }
}

pub fn classify_case(cfg: &Config, case: Case) -> ClassificationResult {
    let progress = progress::progress(case.end_iteration, case.last_iteration);
    let from_progress = progress::status_from_progress(progress);
    let status = log_scan::refine_status(
        &case.log_path,
        from_progress,
        cfg.classification.mesh_crash_threshold,
    );
    debug!(
        "case={} end={} last={} progress={:.1} status={:?}",
        case.case_dir.display(),
        case.end_iteration,
        case.last_iteration,
        progress,
        status
    );
    ClassificationResult {
        case,
        status,
        progress,
    }
}

/// Locate and classify every case under `root`.
pub fn analyze(root: &Path, cfg: &Config) -> Result<Census> {
    let cases = locator::locate_cases(root, &cfg.discovery)?;
    let results = cases
        .into_iter()
        .map(|case| classify_case(cfg, case))
        .collect();

    let census = Census::from_results(root, results);
    info!(
        "root={} cases={} done={} ratio={:.3}",
        root.display(),
        census.total,
        census.counts.completed,
        census.ratio
    );
    Ok(census)
}
