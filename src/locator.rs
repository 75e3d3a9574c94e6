use crate::{config::Discovery, iteration};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One simulation case, found through its control dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub config_path: PathBuf,
    pub case_dir: PathBuf,
    pub end_iteration: f64,
    pub last_iteration: u64,
    pub log_path: PathBuf,
}

impl Case {
    pub fn from_config_path(config_path: PathBuf, discovery: &Discovery) -> Self {
        let case_dir = case_dir_for(&config_path, discovery.case_depth);
        let end_iteration = iteration::parse_end_iteration(&config_path);
        let last_iteration = iteration::last_iteration(&case_dir);
        let log_path = case_dir.join(&discovery.log_file);
        Self {
            config_path,
            case_dir,
            end_iteration,
            last_iteration,
            log_path,
        }
    }
}

/// Find every case under `root`, in deterministic walk order.
///
/// Only an unreadable root is an error; anything below it that cannot be
/// listed is skipped.
pub fn locate_cases(root: &Path, discovery: &Discovery) -> Result<Vec<Case>> {
    let configs = find_control_dicts(root, discovery)?;
    Ok(configs
        .into_iter()
        .map(|p| Case::from_config_path(p, discovery))
        .collect())
}

pub fn find_control_dicts(root: &Path, discovery: &Discovery) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("case root is not a directory: {}", root.display());
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) if err.depth() == 0 => {
                return Err(err).with_context(|| format!("reading case root: {}", root.display()));
            }
            Err(err) => {
                warn!("skipping {}: {err}", err.path().unwrap_or(root).display());
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let is_control_dict = entry
            .file_name()
            .to_str()
            .is_some_and(|n| n.starts_with(&discovery.control_dict_prefix));
        if !is_control_dict || !entry.path().is_file() {
            continue;
        }

        if has_segment(entry.path(), &discovery.excluded_segment) {
            debug!("ignoring mesh control dictionary {}", entry.path().display());
            continue;
        }

        found.push(entry.into_path());
    }
    Ok(found)
}

/// True when any component of `path` is exactly `segment`.
pub fn has_segment(path: &Path, segment: &str) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(s) if s == segment))
}

/// The case root for a control dictionary: `depth` levels above the file.
/// A relative path that runs out of components continues at `.`.
pub fn case_dir_for(config_path: &Path, depth: usize) -> PathBuf {
    let mut dir = config_path.to_path_buf();
    for _ in 0..depth {
        match dir.parent() {
            Some(p) if p.as_os_str().is_empty() => dir = PathBuf::from("."),
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_dir_is_two_levels_up() {
        let p = Path::new("/runs/case_1/system/controlDict");
        assert_eq!(case_dir_for(p, 2), PathBuf::from("/runs/case_1"));
    }

    #[test]
    fn case_dir_climbs_relative_paths_to_cwd() {
        assert_eq!(case_dir_for(Path::new("system/controlDict"), 2), PathBuf::from("."));
        assert_eq!(case_dir_for(Path::new("controlDict"), 2), PathBuf::from("."));
        assert_eq!(case_dir_for(Path::new("./system/controlDict"), 2), PathBuf::from("."));
        assert_eq!(case_dir_for(Path::new("/controlDict"), 2), PathBuf::from("/"));
    }

    #[test]
    fn mesh_segment_must_match_exactly() {
        assert!(has_segment(Path::new("/a/mesh/system/controlDict"), "mesh"));
        assert!(!has_segment(Path::new("/a/meshes/system/controlDict"), "mesh"));
        assert!(!has_segment(Path::new("/a/Mesh/system/controlDict"), "mesh"));
        assert!(!has_segment(Path::new("/a/snappy_mesh/controlDict"), "mesh"));
    }
}
