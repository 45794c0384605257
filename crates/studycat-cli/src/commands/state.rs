use clap::Subcommand;

use super::{open_store, print_json, CmdResult};

#[derive(Subcommand)]
pub enum StateAction {
    /// Print the full state snapshot as stored
    Show,
}

pub fn run(action: StateAction) -> CmdResult {
    match action {
        StateAction::Show => {
            let (store, _) = open_store()?;
            print_json(&*store.state())?;
        }
    }
    Ok(())
}
