use crate::{census, config::Config, report, util::ensure_dir};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "foam-check")]
#[command(about = "Classify the run status of every OpenFOAM case below a directory")]
pub struct Args {
    /// Directory to scan (default: current directory).
    pub path: Option<PathBuf>,

    /// Path to config TOML. Built-in defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the census as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,

    #[arg(long)]
    pub no_color: bool,

    /// Leave out the run/rename suggestions for not-started cases.
    #[arg(long)]
    pub no_remediation: bool,
}

pub fn dispatch(args: Args) -> Result<()> {
    let mut cfg = match Config::load_or_default(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            // Still get the error onto stderr.
            let _ = init_logging(&args, &Config::default(), None);
            return Err(err);
        }
    };
    apply_overrides(&args, &mut cfg);

    let log_path = resolve_log_path(&cfg);
    let _guard = init_logging(&args, &cfg, log_path.as_deref())?;

    let root = match &args.path {
        Some(p) => p.clone(),
        None => std::env::current_dir().context("resolving current directory")?,
    };
    run(&cfg, &root)
}

fn apply_overrides(args: &Args, cfg: &mut Config) {
    if args.json {
        cfg.report.json = true;
    }
    if args.no_color {
        cfg.report.color = false;
    }
    if args.no_remediation {
        cfg.report.remediation = false;
    }
}

fn run(cfg: &Config, root: &Path) -> Result<()> {
    info!("analyzing {}", root.display());
    let census = census::analyze(root, cfg)?;

    if cfg.report.json {
        println!("{}", report::render_json(&census)?);
    } else {
        print!("{}", report::render_text(&census, &cfg.report));
    }
    Ok(())
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the report, diagnostics go to stderr.
    let stderr_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(cfg.report.color)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file || cfg.logging.file_path.is_empty() {
        return None;
    }
    Some(PathBuf::from(&cfg.logging.file_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_optional() {
        let args = Args::try_parse_from(["foam-check"]).unwrap();
        assert!(args.path.is_none());
        assert!(!args.json);
    }

    #[test]
    fn flags_override_config() {
        let args =
            Args::try_parse_from(["foam-check", "runs", "--json", "--no-color", "--no-remediation"])
                .unwrap();
        assert_eq!(args.path, Some(PathBuf::from("runs")));

        let mut cfg = Config::default();
        apply_overrides(&args, &mut cfg);
        assert!(cfg.report.json);
        assert!(!cfg.report.color);
        assert!(!cfg.report.remediation);
    }

    #[test]
    fn no_log_file_by_default() {
        assert!(resolve_log_path(&Config::default()).is_none());
    }
}
