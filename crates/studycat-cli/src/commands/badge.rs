use clap::Subcommand;
use studycat_core::{BadgeId, Operation};

use super::{open_store, print_json, report, CmdResult};

#[derive(Subcommand)]
pub enum BadgeAction {
    /// List all badges and whether they are unlocked
    List {
        /// Only show unlocked badges
        #[arg(long)]
        unlocked: bool,
    },
    /// Unlock a badge by id (e.g. night-owl)
    Unlock {
        id: BadgeId,
    },
    /// Run the night-owl check once against the current time
    Check,
}

pub fn run(action: BadgeAction) -> CmdResult {
    let (mut store, _) = open_store()?;

    match action {
        BadgeAction::List { unlocked } => {
            let state = store.state();
            let badges: Vec<_> = state
                .badges
                .iter()
                .filter(|b| !unlocked || b.unlocked)
                .collect();
            print_json(&badges)?;
        }
        BadgeAction::Unlock { id } => report(&store.apply(Operation::UnlockBadge { id }))?,
        BadgeAction::Check => {
            let unlocked = store.check_night_owl();
            print_json(&serde_json::json!({ "nightOwlUnlocked": unlocked }))?;
        }
    }

    Ok(())
}
