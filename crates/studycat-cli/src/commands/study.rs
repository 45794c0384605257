use clap::Subcommand;
use studycat_core::Operation;

use super::{open_store, print_json, report, CmdResult};

#[derive(Subcommand)]
pub enum StudyAction {
    /// Add minutes to today's study log
    Log {
        /// Minutes studied
        minutes: u32,
    },
    /// Show every study log, oldest first
    List,
}

pub fn run(action: StudyAction) -> CmdResult {
    let (mut store, _) = open_store()?;

    match action {
        StudyAction::Log { minutes } => {
            report(&store.apply(Operation::AddStudyMinutes { minutes }))?;
        }
        StudyAction::List => {
            let state = store.state();
            let mut logs = state.study_logs.clone();
            logs.sort_by_key(|l| l.date);
            print_json(&logs)?;
        }
    }

    Ok(())
}
