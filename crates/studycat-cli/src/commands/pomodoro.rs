//! Focus session events reported by the timer.

use clap::Subcommand;
use studycat_core::Operation;

use super::{open_store, print_json, report, CmdResult};

#[derive(Subcommand)]
pub enum PomodoroAction {
    /// Record a finished focus session (one pomodoro plus 25 study minutes)
    Complete,
    /// Increment the pomodoro counter without logging study time
    Increment,
    /// Show the number of completed pomodoros
    Count,
}

pub fn run(action: PomodoroAction) -> CmdResult {
    let (mut store, _) = open_store()?;

    match action {
        PomodoroAction::Complete => report(&store.apply(Operation::CompleteFocusSession))?,
        PomodoroAction::Increment => report(&store.apply(Operation::IncrementPomodoro))?,
        PomodoroAction::Count => print_json(&serde_json::json!({
            "pomodorosCompleted": store.state().pomodoros_completed,
        }))?,
    }

    Ok(())
}
