//! # StudyCat Core Library
//!
//! This library provides the application state engine for StudyCat, a study
//! tracker where finished tasks and focus sessions earn catcoins, unlock
//! badges and keep a virtual cat happy. Every consumer (the CLI, a GUI) reads
//! snapshots from the same [`Store`] and changes state only through named
//! [`Operation`]s.
//!
//! ## Architecture
//!
//! - **Data Model**: [`AppState`] and the records it owns
//! - **Evaluators**: pure streak, badge-eligibility and mood rules
//! - **Operations**: pure snapshot-to-snapshot transformations
//! - **Store**: owns the snapshot, runs post-mutation hooks, persists
//! - **Storage**: SQLite snapshot storage and TOML configuration
//!
//! ## Key Components
//!
//! - [`Store`]: the single mutation entry point
//! - [`Operation`]: the mutation vocabulary
//! - [`SnapshotStore`]: persistence contract, implemented by [`Database`]
//! - [`Clock`]: injectable wall clock
//! - [`NightOwlWatch`]: cancellable periodic badge check

pub mod badges;
pub mod clock;
pub mod error;
pub mod evaluators;
pub mod events;
mod hooks;
pub mod model;
pub mod ops;
pub mod shop;
pub mod stats;
pub mod storage;
pub mod store;
pub mod watch;

pub use badges::{Badge, BadgeId};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use model::{AppState, Mood, NewTask, PetStatus, StudyLog, Subject, Task};
pub use ops::{OpStatus, Operation};
pub use stats::{subject_distribution, ChartPeriod, StudyChart, StudySummary, SubjectShare};
pub use storage::{Config, Database, MemorySnapshotStore, SnapshotStore};
pub use store::{Applied, SharedStore, Store};
pub use watch::NightOwlWatch;
