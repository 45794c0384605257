//! Post-mutation hooks.
//!
//! Run by the store on every applied transition, always in this order:
//!
//! 1. consistent-learner, when study minutes were added
//! 2. math-wizard, when the task list changed
//! 3. pet mood, when study logs changed
//!
//! Pomodoro-master is decided inside the operation itself. Early-bird and
//! night-owl are time-driven and live on the store.

use chrono::NaiveDate;

use crate::badges::BadgeId;
use crate::evaluators;
use crate::events::Event;
use crate::model::AppState;
use crate::ops::{self, Changes};

pub(crate) fn run(state: &mut AppState, changes: Changes, today: NaiveDate, events: &mut Vec<Event>) {
    if changes.study_minutes_added && evaluators::consistent_learner_eligible(state, today) {
        ops::unlock(state, BadgeId::ConsistentLearner, events);
    }

    if changes.tasks && evaluators::math_wizard_eligible(state) {
        ops::unlock(state, BadgeId::MathWizard, events);
    }

    if changes.study_logs {
        refresh_mood(state, today, events);
    }
}

/// Recompute the pet mood from study logs, replacing any forced mood.
pub(crate) fn refresh_mood(state: &mut AppState, today: NaiveDate, events: &mut Vec<Event>) {
    let mood = evaluators::mood(state, today);
    ops::set_mood(state, mood, events);
}
