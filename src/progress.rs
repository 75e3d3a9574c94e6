use crate::status::Status;

/// Percent of the configured iterations that have been written out.
/// Not clamped: restarts past `endTime` give values above 100.
pub fn progress(end_iteration: f64, last_iteration: u64) -> f64 {
    if end_iteration <= 0.0 || end_iteration.is_nan() {
        return 0.0;
    }
    100.0 * last_iteration as f64 / end_iteration
}

pub fn status_from_progress(progress: f64) -> Status {
    if progress >= 100.0 {
        Status::Completed
    } else if progress > 0.0 {
        Status::InProgress
    } else {
        Status::NotStarted
    }
}
