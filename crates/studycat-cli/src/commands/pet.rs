//! Pet status and accessory shop commands.

use clap::Subcommand;
use studycat_core::shop::SHOP_ITEMS;
use studycat_core::Operation;

use super::{open_store, print_json, report, CmdResult};

#[derive(Subcommand)]
pub enum PetAction {
    /// Show the pet's mood and accessories
    Status,
    /// List accessories for sale
    Shop,
    /// Buy an accessory from the shop
    Buy {
        /// Item id (hat, glasses, bowtie)
        item: String,
    },
}

pub fn run(action: PetAction) -> CmdResult {
    match action {
        PetAction::Shop => print_json(&SHOP_ITEMS[..])?,
        PetAction::Status => {
            let (store, _) = open_store()?;
            print_json(&store.state().pet_status)?;
        }
        PetAction::Buy { item } => {
            let (mut store, _) = open_store()?;
            report(&store.apply(Operation::BuyAccessory { item }))?;
        }
    }

    Ok(())
}
