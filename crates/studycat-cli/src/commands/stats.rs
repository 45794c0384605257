//! Statistics commands for CLI.

use clap::Subcommand;
use studycat_core::{subject_distribution, ChartPeriod, StudyChart, StudySummary};

use super::{open_store, print_json, CmdResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Totals, averages and streak
    Summary,
    /// Share of completed tasks per subject
    Subjects,
    /// Daily study minutes over a period
    Chart {
        /// Period: week, month or all
        #[arg(long, default_value = "week")]
        period: ChartPeriod,
    },
}

pub fn run(action: StatsAction) -> CmdResult {
    let (store, _) = open_store()?;
    let state = store.state();
    let today = store.clock().today();

    match action {
        StatsAction::Summary => print_json(&StudySummary::compute(&state, today))?,
        StatsAction::Subjects => print_json(&subject_distribution(&state))?,
        StatsAction::Chart { period } => print_json(&StudyChart::compute(&state, period, today))?,
    }

    Ok(())
}
