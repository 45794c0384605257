use clap::Subcommand;
use studycat_core::Operation;

use super::{open_store, print_json, report, CmdResult};

#[derive(Subcommand)]
pub enum CoinsAction {
    /// Show the catcoin balance
    Balance,
    /// Add catcoins
    Add {
        amount: u64,
    },
    /// Spend catcoins; fails if the balance is too low
    Spend {
        amount: u64,
    },
}

pub fn run(action: CoinsAction) -> CmdResult {
    let (mut store, _) = open_store()?;

    match action {
        CoinsAction::Balance => print_json(&serde_json::json!({
            "catcoins": store.state().catcoins,
        }))?,
        CoinsAction::Add { amount } => report(&store.apply(Operation::AddCatcoins { amount }))?,
        CoinsAction::Spend { amount } => {
            report(&store.apply(Operation::SpendCatcoins { amount }))?
        }
    }

    Ok(())
}
