use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: Discovery,
    #[serde(default)]
    pub classification: Classification,
    #[serde(default)]
    pub report: Report,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }

    /// Defaults unless a config file was given explicitly.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Discovery {
    pub control_dict_prefix: String,
    pub excluded_segment: String,
    /// Path levels from a control dictionary up to its case root
    /// (`<case>/system/controlDict` is two).
    pub case_depth: usize,
    pub log_file: String,
}
impl Default for Discovery {
    fn default() -> Self {
        Self {
            control_dict_prefix: "controlDict".into(),
            excluded_segment: "mesh".into(),
            case_depth: 2,
            log_file: "log".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Classification {
    /// Convergence reported below this iteration count means a broken mesh.
    pub mesh_crash_threshold: u64,
}
impl Default for Classification {
    fn default() -> Self {
        Self {
            mesh_crash_threshold: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    pub color: bool,
    pub json: bool,
    pub remediation: bool,
    pub run_script: String,
    pub rename_from: String,
    pub rename_to: String,
}
impl Default for Report {
    fn default() -> Self {
        Self {
            color: true,
            json: false,
            remediation: true,
            run_script: "run.bat".into(),
            rename_from: "Batch_ESLTower64/_mesh_and_sim_ESLTower64.bat".into(),
            rename_to: "_mesh_and_sim_ESLTower64_next.bat".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            json: false,
            write_to_file: false,
            file_path: "foam-check.log".into(),
        }
    }
}
