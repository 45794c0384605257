use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::badges::BadgeId;
use crate::model::Mood;

/// Every state change in the engine produces one or more Events.
/// Observers registered on the store receive them after the snapshot swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TaskAdded {
        task_id: String,
    },
    TaskCompleted {
        task_id: String,
        catcoins: u64,
    },
    TaskUncompleted {
        task_id: String,
        catcoins: u64,
    },
    StudyLogged {
        date: NaiveDate,
        minutes_added: u32,
        total_minutes: u32,
    },
    PomodoroCompleted {
        count: u32,
    },
    CatcoinsEarned {
        amount: u64,
        balance: u64,
    },
    CatcoinsSpent {
        amount: u64,
        balance: u64,
    },
    BadgeUnlocked {
        badge: BadgeId,
    },
    AccessoryAdded {
        accessory: String,
    },
    /// Pet mood moved, either by the mood evaluator or by a new accessory.
    MoodChanged {
        from: Mood,
        to: Mood,
    },
    /// First-run sample data was seeded.
    SampleDataLoaded {
        tasks: usize,
        study_logs: usize,
    },
}
