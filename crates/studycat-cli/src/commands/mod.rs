pub mod badge;
pub mod coins;
pub mod config;
pub mod pet;
pub mod pomodoro;
pub mod state;
pub mod stats;
pub mod study;
pub mod task;
pub mod watch;

use serde::Serialize;
use std::sync::Arc;
use studycat_core::{Applied, Config, Database, OpStatus, Operation, Store, SystemClock};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the persisted store for one command.
///
/// Seeds sample data on an empty state when the config asks for it.
pub fn open_store() -> Result<(Store, Config), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open(&config)?;
    let mut store = Store::open(db, Arc::new(SystemClock));
    if config.session.load_sample_data {
        store.apply(Operation::LoadSampleData);
    }
    Ok((store, config))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
struct Report<'a> {
    status: &'static str,
    events: &'a [studycat_core::Event],
}

/// Print the outcome of an operation; a rejected operation becomes an error.
pub fn report(applied: &Applied) -> CmdResult {
    let status = match &applied.status {
        OpStatus::Applied => "applied",
        OpStatus::Unchanged => "unchanged",
        OpStatus::Rejected(e) => return Err(e.clone().into()),
    };
    print_json(&Report {
        status,
        events: &applied.events,
    })
}
