use crate::{
    census::{Census, ClassificationResult},
    config::Report,
    remediation,
    status::Status,
    util::now_rfc3339,
};
use anyhow::Result;
use colored::{Color, Colorize};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    #[serde(flatten)]
    census: &'a Census,
}

pub fn render_json(census: &Census) -> Result<String> {
    let doc = JsonReport {
        generated_at: now_rfc3339(),
        census,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn case_line(result: &ClassificationResult, color: bool) -> String {
    let (label, tint) = match result.status {
        Status::InProgress => (format!("{:.1}% Done", result.progress), Color::Cyan),
        Status::Completed => (Status::Completed.label().to_string(), Color::Cyan),
        Status::Converged => (Status::Converged.label().to_string(), Color::Green),
        Status::NotStarted => (Status::NotStarted.label().to_string(), Color::White),
        s @ (Status::Crashed | Status::MeshCrashed) => (s.label().to_string(), Color::Red),
        Status::NotChecked => (Status::NotChecked.label().to_string(), Color::Yellow),
    };
    format!(
        "{} - {}",
        result.case.case_dir.display(),
        paint(&label, tint, color)
    )
}

pub fn summary_line(census: &Census) -> String {
    format!(
        "{} out of {} simulations done or {:.1}%",
        census.counts.completed,
        census.total,
        100.0 * census.ratio
    )
}

pub fn render_text(census: &Census, opts: &Report) -> String {
    let mut lines: Vec<String> = census
        .results
        .iter()
        .map(|r| case_line(r, opts.color))
        .collect();

    lines.push(paint(&summary_line(census), Color::Green, opts.color));
    let c = &census.counts;
    lines.push(format!(
        "converged={} in_progress={} not_started={} crashed={} mesh_crashed={}",
        c.converged, c.in_progress, c.not_started, c.crashed, c.mesh_crashed
    ));

    // Detail blocks only once at least one case is done.
    if census.ratio > 0.0 {
        section(&mut lines, format!("Crashed Cases: {}", c.crashed));
        lines.extend(
            census
                .cases_with(Status::Crashed)
                .iter()
                .map(|dir| format!("start {}", dir.display())),
        );

        let not_started = census.cases_with(Status::NotStarted);
        section(&mut lines, format!("Not started: {}", c.not_started));
        if opts.remediation {
            lines.extend(
                not_started
                    .iter()
                    .map(|dir| remediation::run_script_for(dir, opts).display().to_string()),
            );
            section(&mut lines, "Rename cases remaining".to_string());
            lines.extend(
                not_started
                    .iter()
                    .map(|dir| remediation::rename_command_for(dir, opts)),
            );
        } else {
            lines.extend(not_started.iter().map(|dir| dir.display().to_string()));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// `###` separator, then a blank line, then `heading`.
fn section(lines: &mut Vec<String>, heading: String) {
    lines.extend([String::new(), "###".to_string(), String::new(), heading]);
}

fn paint(text: &str, tint: Color, enabled: bool) -> String {
    if enabled {
        text.color(tint).to_string()
    } else {
        text.to_string()
    }
}
