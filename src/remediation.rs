//! Operator command suggestions for cases that never started.
//!
//! These are batch-file conventions of the cluster the tool grew up on. They
//! only feed the text report and never influence classification.

use crate::config::Report;
use std::path::{Path, PathBuf};

/// Script that relaunches the batch a case belongs to.
pub fn run_script_for(case_dir: &Path, report: &Report) -> PathBuf {
    batch_dir(case_dir).join(&report.run_script)
}

/// `ren` command that re-arms the batch's mesh-and-sim script.
pub fn rename_command_for(case_dir: &Path, report: &Report) -> String {
    let from = batch_dir(case_dir).join(&report.rename_from);
    format!("ren {} {}", from.display(), report.rename_to)
}

fn batch_dir(case_dir: &Path) -> &Path {
    match case_dir.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => case_dir,
    }
}
