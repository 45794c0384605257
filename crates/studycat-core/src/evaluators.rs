//! Derived-state evaluators.
//!
//! Pure functions of a snapshot and the current date/time. The store runs the
//! badge and mood evaluators as post-mutation hooks; nothing here mutates.

use chrono::{Days, NaiveDate, NaiveDateTime, Timelike};

use crate::model::{AppState, Mood, Subject};

/// Days in a row required for the consistent-learner badge.
pub const CONSISTENT_LEARNER_DAYS: u64 = 7;
/// Early-bird unlocks when a session starts before this hour.
pub const EARLY_BIRD_BEFORE_HOUR: u32 = 6;
/// Night-owl is only checked from this hour on.
pub const NIGHT_OWL_FROM_HOUR: u32 = 22;
/// Minutes that must be logged today for night-owl.
pub const NIGHT_OWL_MIN_MINUTES: u32 = 120;
/// Completed math tasks required for math-wizard.
pub const MATH_WIZARD_TASKS: usize = 20;
/// Pomodoro count at which pomodoro-master unlocks.
pub const POMODORO_MASTER_COUNT: u32 = 10;
/// Today's minutes above which the pet is happy.
pub const HAPPY_ABOVE_MINUTES: u32 = 60;
/// Yesterday's minutes below which an idle day makes the pet sad.
pub const SAD_BELOW_MINUTES: u32 = 30;

/// Consecutive days ending today that have a study log, walking backwards.
///
/// Returns 0 when there is no log for today.
pub fn streak(state: &AppState, today: NaiveDate) -> u32 {
    let mut count = 0;
    let mut day = Some(today);
    while let Some(d) = day {
        if state.log_for(d).is_none() {
            break;
        }
        count += 1;
        day = d.checked_sub_days(Days::new(1));
    }
    count
}

/// Every one of the seven days ending today has minutes > 0.
pub fn consistent_learner_eligible(state: &AppState, today: NaiveDate) -> bool {
    (0..CONSISTENT_LEARNER_DAYS).all(|back| {
        today
            .checked_sub_days(Days::new(back))
            .is_some_and(|d| state.minutes_on(d) > 0)
    })
}

pub fn early_bird_eligible(now: NaiveDateTime) -> bool {
    now.hour() < EARLY_BIRD_BEFORE_HOUR
}

pub fn night_owl_eligible(state: &AppState, now: NaiveDateTime) -> bool {
    now.hour() >= NIGHT_OWL_FROM_HOUR && state.minutes_on(now.date()) >= NIGHT_OWL_MIN_MINUTES
}

pub fn completed_math_tasks(state: &AppState) -> usize {
    state
        .tasks
        .iter()
        .filter(|t| t.completed && t.subject == Subject::Math)
        .count()
}

pub fn math_wizard_eligible(state: &AppState) -> bool {
    completed_math_tasks(state) >= MATH_WIZARD_TASKS
}

/// Pet mood inferred from today's and yesterday's study logs.
///
/// - `Happy` when more than an hour is logged today.
/// - `Sad` when nothing is logged today and yesterday had no log or under 30 minutes.
/// - `Neutral` otherwise.
pub fn mood(state: &AppState, today: NaiveDate) -> Mood {
    let today_log = state.log_for(today);
    let yesterday_log = today
        .checked_sub_days(Days::new(1))
        .and_then(|d| state.log_for(d));

    match (today_log, yesterday_log) {
        (Some(t), _) if t.minutes > HAPPY_ABOVE_MINUTES => Mood::Happy,
        (None, None) => Mood::Sad,
        (None, Some(y)) if y.minutes < SAD_BELOW_MINUTES => Mood::Sad,
        _ => Mood::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StudyLog, Task};

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, n).unwrap()
    }

    fn with_logs(logs: &[(u32, u32)]) -> AppState {
        let mut state = AppState::default();
        state.study_logs = logs
            .iter()
            .map(|&(d, minutes)| StudyLog { date: day(d), minutes })
            .collect();
        state
    }

    #[test]
    fn streak_counts_back_from_today() {
        let state = with_logs(&[(10, 30), (9, 20), (8, 5), (6, 40)]);
        assert_eq!(streak(&state, day(10)), 3);
    }

    #[test]
    fn streak_is_zero_without_log_today() {
        let state = with_logs(&[(9, 30), (8, 30)]);
        assert_eq!(streak(&state, day(10)), 0);
    }

    #[test]
    fn streak_ignores_log_order() {
        let state = with_logs(&[(8, 30), (10, 30), (9, 30)]);
        assert_eq!(streak(&state, day(10)), 3);
    }

    #[test]
    fn consistent_learner_needs_all_seven_days() {
        let full = with_logs(&[(10, 5), (9, 5), (8, 5), (7, 5), (6, 5), (5, 5), (4, 5)]);
        assert!(consistent_learner_eligible(&full, day(10)));

        // Days -1..-6 present but today missing.
        let missing_today = with_logs(&[(9, 5), (8, 5), (7, 5), (6, 5), (5, 5), (4, 5), (3, 5)]);
        assert!(!consistent_learner_eligible(&missing_today, day(10)));

        let zero_minutes = with_logs(&[(10, 5), (9, 5), (8, 0), (7, 5), (6, 5), (5, 5), (4, 5)]);
        assert!(!consistent_learner_eligible(&zero_minutes, day(10)));
    }

    #[test]
    fn early_bird_before_six() {
        assert!(early_bird_eligible(day(1).and_hms_opt(5, 59, 0).unwrap()));
        assert!(!early_bird_eligible(day(1).and_hms_opt(6, 0, 0).unwrap()));
    }

    #[test]
    fn night_owl_needs_late_hour_and_two_hours() {
        let state = with_logs(&[(10, 120)]);
        assert!(night_owl_eligible(&state, day(10).and_hms_opt(22, 0, 0).unwrap()));
        assert!(!night_owl_eligible(&state, day(10).and_hms_opt(21, 59, 0).unwrap()));

        let short = with_logs(&[(10, 119)]);
        assert!(!night_owl_eligible(&short, day(10).and_hms_opt(23, 0, 0).unwrap()));
    }

    #[test]
    fn math_wizard_counts_completed_math_only() {
        let mut state = AppState::default();
        for i in 0..25 {
            state.tasks.push(Task {
                id: format!("t{i}"),
                name: "drill".into(),
                subject: if i < 20 { Subject::Math } else { Subject::English },
                due_date: day(1),
                priority: 3,
                completed: i != 0,
            });
        }
        assert_eq!(completed_math_tasks(&state), 19);
        assert!(!math_wizard_eligible(&state));

        state.tasks[0].completed = true;
        assert!(math_wizard_eligible(&state));
    }

    #[test]
    fn mood_rules() {
        assert_eq!(mood(&with_logs(&[(10, 61)]), day(10)), Mood::Happy);
        assert_eq!(mood(&with_logs(&[(10, 60)]), day(10)), Mood::Neutral);
        assert_eq!(mood(&with_logs(&[]), day(10)), Mood::Sad);
        assert_eq!(mood(&with_logs(&[(9, 29)]), day(10)), Mood::Sad);
        assert_eq!(mood(&with_logs(&[(9, 30)]), day(10)), Mood::Neutral);
        assert_eq!(mood(&with_logs(&[(10, 5), (9, 0)]), day(10)), Mood::Neutral);
    }
}
