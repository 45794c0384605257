//! The state store.
//!
//! Owns the one `AppState` of a session and is the only way to change it.
//! Each [`Store::apply`] call runs to completion before the next one starts:
//!
//! ```text
//! transform -> hooks -> swap snapshot -> notify observers -> save
//! ```
//!
//! Snapshots are handed out as `Arc<AppState>`; a swap never mutates a
//! snapshot a caller still holds.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open(Database::open(&config)?, Arc::new(SystemClock));
//! store.apply(Operation::CompleteFocusSession);
//! println!("{}", store.state().catcoins);
//! ```

use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::badges::BadgeId;
use crate::clock::Clock;
use crate::evaluators;
use crate::events::Event;
use crate::hooks;
use crate::model::AppState;
use crate::ops::{self, OpContext, OpStatus, Operation, Transition};
use crate::storage::SnapshotStore;
use crate::watch::NightOwlWatch;

/// Called with each event after the snapshot it belongs to is in place.
pub type Observer = Box<dyn FnMut(&Event, &AppState) + Send>;

/// A store shared between the caller and background tasks.
pub type SharedStore = Arc<Mutex<Store>>;

/// Outcome of [`Store::apply`].
#[derive(Debug, Clone)]
pub struct Applied {
    /// The current snapshot after the call (the old one if nothing changed).
    pub state: Arc<AppState>,
    pub status: OpStatus,
    pub events: Vec<Event>,
}

impl Applied {
    /// Whether the operation took effect. This is the boolean result of
    /// SpendCatcoins and BuyAccessory.
    pub fn succeeded(&self) -> bool {
        self.status.is_applied()
    }
}

pub struct Store {
    state: Arc<AppState>,
    persistence: Box<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
    rng: Pcg64,
    observers: Vec<Observer>,
    night_owl: Option<NightOwlWatch>,
}

impl Store {
    /// Load the persisted snapshot (or the default state) and run the
    /// session-start checks.
    ///
    /// A failing load is logged and treated like a missing snapshot.
    pub fn open<P: SnapshotStore + 'static>(persistence: P, clock: Arc<dyn Clock>) -> Self {
        let state = match persistence.load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::debug!("no saved snapshot, starting from default state");
                AppState::default()
            }
            Err(error) => {
                tracing::warn!(%error, "failed to load state snapshot, starting from default state");
                AppState::default()
            }
        };

        let mut store = Self {
            state: Arc::new(state),
            persistence: Box::new(persistence),
            clock,
            rng: Pcg64::from_entropy(),
            observers: Vec::new(),
            night_owl: None,
        };
        store.start_session();
        store
    }

    /// Use a deterministic random source for sample data.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Pcg64::seed_from_u64(seed);
        self
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// Start the periodic night-owl check and tie it to this store.
    ///
    /// The poll only holds a weak reference, so it never keeps the store
    /// alive; it stops on [`Store::close`] or when the store is dropped.
    /// Attaching again replaces (and stops) the previous poll.
    ///
    /// Must be called from within a tokio runtime.
    pub fn attach_night_owl_watch(shared: &SharedStore, period: Duration) {
        let watch = NightOwlWatch::spawn(Arc::downgrade(shared), period);
        let mut store = shared.lock().unwrap_or_else(|e| e.into_inner());
        store.night_owl = Some(watch);
    }

    pub fn has_night_owl_watch(&self) -> bool {
        self.night_owl.as_ref().is_some_and(NightOwlWatch::is_running)
    }

    /// Tear down the session: stop the night-owl poll if one is attached.
    pub fn close(&mut self) {
        if self.night_owl.take().is_some() {
            tracing::debug!("store closed, night-owl watch stopped");
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Register an observer. Observers run in registration order.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&Event, &AppState) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Execute `op` against the current snapshot.
    ///
    /// Rejected and no-op operations leave the snapshot in place and do not
    /// save. Applied operations run the post-mutation hooks, replace the
    /// snapshot, notify observers and save.
    pub fn apply(&mut self, op: Operation) -> Applied {
        let today = self.clock.today();
        let mut ctx = OpContext {
            today,
            rng: &mut self.rng,
        };
        let Transition {
            mut state,
            status,
            changes,
            mut events,
        } = ops::transform(&self.state, &op, &mut ctx);

        if !status.is_applied() {
            tracing::debug!(?op, ?status, "operation not applied");
            return Applied {
                state: self.state(),
                status,
                events: Vec::new(),
            };
        }

        hooks::run(&mut state, changes, today, &mut events);
        tracing::debug!(?op, events = events.len(), "operation applied");
        self.commit(state, &events);

        Applied {
            state: self.state(),
            status,
            events,
        }
    }

    /// SpendCatcoins with its boolean result.
    pub fn spend_catcoins(&mut self, amount: u64) -> bool {
        self.apply(Operation::SpendCatcoins { amount }).succeeded()
    }

    /// Replace the snapshot with what persistence holds now.
    ///
    /// Other processes write the same snapshot while a long-lived store is
    /// open. Observers are not notified. A missing or unreadable snapshot
    /// keeps the current one. Returns true when the snapshot changed.
    pub fn reload(&mut self) -> bool {
        match self.persistence.load() {
            Ok(Some(state)) if state != *self.state => {
                tracing::debug!("reloaded newer state snapshot");
                self.state = Arc::new(state);
                true
            }
            Ok(_) => false,
            Err(error) => {
                tracing::warn!(%error, "failed to reload state snapshot, keeping current state");
                false
            }
        }
    }

    /// Unlock night-owl if it is late and today has two hours of study.
    ///
    /// Reloads the persisted snapshot first so the check sees study time
    /// logged elsewhere and the unlock does not overwrite it.
    ///
    /// Returns true when the badge was unlocked by this call.
    pub fn check_night_owl(&mut self) -> bool {
        self.reload();
        let now = self.clock.now();
        if self.state.is_unlocked(BadgeId::NightOwl) || !evaluators::night_owl_eligible(&self.state, now) {
            return false;
        }
        self.apply(Operation::UnlockBadge { id: BadgeId::NightOwl })
            .succeeded()
    }

    /// Early-bird check and initial mood, once per session.
    fn start_session(&mut self) {
        let now = self.clock.now();
        let mut state = (*self.state).clone();
        let mut events = Vec::new();

        if evaluators::early_bird_eligible(now) {
            ops::unlock(&mut state, BadgeId::EarlyBird, &mut events);
        }
        hooks::refresh_mood(&mut state, now.date(), &mut events);

        if !events.is_empty() {
            self.commit(state, &events);
        }
    }

    fn commit(&mut self, next: AppState, events: &[Event]) {
        self.state = Arc::new(next);

        for event in events {
            if let Event::BadgeUnlocked { badge } = event {
                tracing::info!(%badge, "badge unlocked");
            }
            for observer in &mut self.observers {
                observer(event, &self.state);
            }
        }

        if let Err(error) = self.persistence.save(&self.state) {
            tracing::warn!(%error, "failed to save state snapshot");
        }
    }
}
