use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Completed,
    Crashed,
    NotStarted,
    Converged,
    InProgress,
    /// Sentinel before evaluation; never reported.
    #[default]
    NotChecked,
    MeshCrashed,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Completed => "Done",
            Status::Crashed => "Crashed",
            Status::NotStarted => "Not Started",
            Status::Converged => "Converged",
            Status::InProgress => "In Progress",
            Status::NotChecked => "Not Checked",
            Status::MeshCrashed => "Meshes Crashed",
        }
    }

    /// Counts toward the "simulations done" figure.
    pub fn is_done(self) -> bool {
        matches!(self, Status::Completed | Status::Converged)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchecked_until_classified() {
        assert_eq!(Status::default(), Status::NotChecked);
    }

    #[test]
    fn converged_is_done() {
        assert!(Status::Completed.is_done());
        assert!(Status::Converged.is_done());
        assert!(!Status::MeshCrashed.is_done());
        assert!(!Status::InProgress.is_done());
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Status::MeshCrashed).unwrap(), "\"mesh_crashed\"");
    }
}
