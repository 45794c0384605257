//! Read-time statistics over a snapshot.
//!
//! Nothing here is stored in `AppState`; consumers recompute on demand:
//! - **Study summary**: totals, per-day average and current streak
//! - **Subject distribution**: completed tasks grouped by subject
//! - **Study chart**: logs for a week, a month or all time

mod study;
mod subjects;

pub use study::{ChartPeriod, StudyChart, StudySummary};
pub use subjects::{subject_distribution, SubjectShare};
