//! Periodic night-owl check.
//!
//! Nothing marks the passing of time inside the engine, so night-owl is polled:
//! a tokio task ticks every `period` and asks the store to check. The task
//! belongs to its [`NightOwlWatch`] handle and stops when the handle is
//! stopped or dropped. It reaches the store through a weak reference and
//! exits once the store is gone, so it never outlives the session it was
//! started for. [`Store::attach_night_owl_watch`] keeps the handle inside the
//! store itself.
//!
//! [`Store::attach_night_owl_watch`]: crate::store::Store::attach_night_owl_watch

use std::sync::{Mutex, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::store::Store;

pub struct NightOwlWatch {
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl NightOwlWatch {
    /// Start polling. The first check happens one `period` from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(store: Weak<Mutex<Store>>, period: Duration) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let Some(store) = store.upgrade() else {
                            tracing::debug!("store dropped, night-owl watch exiting");
                            return;
                        };
                        // The check locks the store and saves to SQLite.
                        let check = tokio::task::spawn_blocking(move || {
                            let mut store = store.lock().unwrap_or_else(|e| e.into_inner());
                            store.check_night_owl()
                        });
                        match check.await {
                            Ok(true) => tracing::debug!("night-owl unlocked by periodic check"),
                            Ok(false) => {}
                            Err(error) => tracing::warn!(%error, "night-owl check failed"),
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            tracing::debug!("night-owl watch stopped");
                            return;
                        }
                    }
                }
            }
        });

        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    /// Signal the task and wait for it to exit.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            if let Err(error) = handle.await {
                tracing::warn!(%error, "night-owl watch task failed");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for NightOwlWatch {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
