//! Long-running session with the periodic night-owl check.

use studycat_core::Store;

use super::{open_store, CmdResult};

pub fn run() -> CmdResult {
    let (store, config) = open_store()?;
    let period = config.night_owl_interval();
    let store = store.into_shared();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        Store::attach_night_owl_watch(&store, period);
        tracing::info!(period_secs = period.as_secs(), "watching for night-owl");
        println!("Watching. Press Ctrl-C to stop.");

        let result = tokio::signal::ctrl_c().await;
        store.lock().unwrap_or_else(|e| e.into_inner()).close();
        result
    })?;

    Ok(())
}
