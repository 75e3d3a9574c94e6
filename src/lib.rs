pub mod census;
pub mod cli;
pub mod config;
pub mod iteration;
pub mod locator;
pub mod log_scan;
pub mod progress;
pub mod remediation;
pub mod report;
pub mod status;
pub mod util;
