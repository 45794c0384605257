//! Mutation operations.
//!
//! [`transform`] is a pure function from one snapshot to the next. It never
//! touches the input; a rejected or no-op operation returns a transition whose
//! status tells the store to keep the old snapshot.
//!
//! ## Catcoin rules
//!
//! - Completing a task awards exactly 10 catcoins, every call.
//! - Uncompleting removes 10, floored at 0. Once the floor is hit a
//!   complete/uncomplete cycle is no longer symmetric.
//! - Spending fails without change when the balance is short.

use chrono::{Days, NaiveDate};
use rand::Rng;
use rand_pcg::Pcg64;
use uuid::Uuid;

use crate::badges::BadgeId;
use crate::error::ValidationError;
use crate::evaluators::POMODORO_MASTER_COUNT;
use crate::events::Event;
use crate::model::{AppState, Mood, NewTask, StudyLog, Subject, Task};
use crate::shop;

/// Catcoins awarded (and taken back) per task completion.
pub const TASK_REWARD: u64 = 10;
/// Minutes credited for one completed focus session.
pub const FOCUS_SESSION_MINUTES: u32 = 25;

/// A named mutation of the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    AddTask(NewTask),
    CompleteTask { id: String },
    UncompleteTask { id: String },
    /// Add minutes to today's study log.
    AddStudyMinutes { minutes: u32 },
    IncrementPomodoro,
    AddCatcoins { amount: u64 },
    SpendCatcoins { amount: u64 },
    UnlockBadge { id: BadgeId },
    AddPetAccessory { accessory: String },
    /// One finished focus session: a pomodoro plus 25 study minutes.
    CompleteFocusSession,
    /// Spend the item's price and add it to the pet's accessories.
    BuyAccessory { item: String },
    /// Seed default tasks and a week of study logs into an empty state.
    LoadSampleData,
}

/// Result of an operation, separate from the snapshot it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpStatus {
    /// The new snapshot replaces the old one.
    Applied,
    /// Nothing to do (unknown id, already owned, already unlocked).
    Unchanged,
    /// A precondition failed; state is untouched.
    Rejected(ValidationError),
}

impl OpStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, OpStatus::Applied)
    }
}

/// Which slices of state an operation touched. Drives the post-mutation hooks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub tasks: bool,
    pub study_logs: bool,
    /// Study minutes were added through AddStudyMinutes or a focus session.
    pub study_minutes_added: bool,
}

/// Per-call inputs that do not live in the snapshot.
pub struct OpContext<'a> {
    pub today: NaiveDate,
    pub rng: &'a mut Pcg64,
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: AppState,
    pub status: OpStatus,
    pub changes: Changes,
    pub events: Vec<Event>,
}

impl Transition {
    fn unchanged(state: &AppState, status: OpStatus) -> Self {
        Self {
            state: state.clone(),
            status,
            changes: Changes::default(),
            events: Vec::new(),
        }
    }
}

/// Apply `op` to a copy of `state`.
pub fn transform(state: &AppState, op: &Operation, ctx: &mut OpContext<'_>) -> Transition {
    let mut next = state.clone();
    let mut changes = Changes::default();
    let mut events = Vec::new();

    match op {
        Operation::AddTask(new_task) => {
            if let Err(e) = new_task.validate() {
                return Transition::unchanged(state, OpStatus::Rejected(e));
            }
            let id = fresh_task_id(&next);
            next.tasks.push(Task {
                id: id.clone(),
                name: new_task.name.trim().to_string(),
                subject: new_task.subject.clone(),
                due_date: new_task.due_date,
                priority: new_task.priority,
                completed: false,
            });
            changes.tasks = true;
            events.push(Event::TaskAdded { task_id: id });
        }
        Operation::CompleteTask { id } => {
            let Some(task) = next.tasks.iter_mut().find(|t| &t.id == id) else {
                return Transition::unchanged(state, OpStatus::Unchanged);
            };
            task.completed = true;
            next.catcoins = next.catcoins.saturating_add(TASK_REWARD);
            changes.tasks = true;
            events.push(Event::TaskCompleted {
                task_id: id.clone(),
                catcoins: next.catcoins,
            });
        }
        Operation::UncompleteTask { id } => {
            let Some(task) = next.tasks.iter_mut().find(|t| &t.id == id) else {
                return Transition::unchanged(state, OpStatus::Unchanged);
            };
            task.completed = false;
            next.catcoins = next.catcoins.saturating_sub(TASK_REWARD);
            changes.tasks = true;
            events.push(Event::TaskUncompleted {
                task_id: id.clone(),
                catcoins: next.catcoins,
            });
        }
        Operation::AddStudyMinutes { minutes } => {
            if *minutes == 0 {
                return Transition::unchanged(state, OpStatus::Rejected(ValidationError::ZeroMinutes));
            }
            add_study_minutes(&mut next, ctx.today, *minutes, &mut events);
            changes.study_logs = true;
            changes.study_minutes_added = true;
        }
        Operation::IncrementPomodoro => {
            increment_pomodoro(&mut next, &mut events);
        }
        Operation::AddCatcoins { amount } => {
            next.catcoins = next.catcoins.saturating_add(*amount);
            events.push(Event::CatcoinsEarned {
                amount: *amount,
                balance: next.catcoins,
            });
        }
        Operation::SpendCatcoins { amount } => {
            if let Err(e) = spend(&mut next, *amount, &mut events) {
                return Transition::unchanged(state, OpStatus::Rejected(e));
            }
        }
        Operation::UnlockBadge { id } => {
            if !unlock(&mut next, *id, &mut events) {
                return Transition::unchanged(state, OpStatus::Unchanged);
            }
        }
        Operation::AddPetAccessory { accessory } => {
            if state.has_accessory(accessory) {
                return Transition::unchanged(state, OpStatus::Unchanged);
            }
            add_accessory(&mut next, accessory, &mut events);
        }
        Operation::CompleteFocusSession => {
            increment_pomodoro(&mut next, &mut events);
            add_study_minutes(&mut next, ctx.today, FOCUS_SESSION_MINUTES, &mut events);
            changes.study_logs = true;
            changes.study_minutes_added = true;
        }
        Operation::BuyAccessory { item } => {
            let item = match shop::lookup(item) {
                Ok(item) => item,
                Err(e) => return Transition::unchanged(state, OpStatus::Rejected(e)),
            };
            if state.has_accessory(item.id) {
                return Transition::unchanged(
                    state,
                    OpStatus::Rejected(ValidationError::AlreadyOwned(item.id.to_string())),
                );
            }
            if let Err(e) = spend(&mut next, item.price, &mut events) {
                return Transition::unchanged(state, OpStatus::Rejected(e));
            }
            add_accessory(&mut next, item.id, &mut events);
        }
        Operation::LoadSampleData => {
            let seeded = load_sample_data(&mut next, ctx);
            if seeded == (0, 0) {
                return Transition::unchanged(state, OpStatus::Unchanged);
            }
            changes.tasks = seeded.0 > 0;
            changes.study_logs = seeded.1 > 0;
            events.push(Event::SampleDataLoaded {
                tasks: seeded.0,
                study_logs: seeded.1,
            });
        }
    }

    Transition {
        state: next,
        status: OpStatus::Applied,
        changes,
        events,
    }
}

/// Set a badge's unlocked flag. Returns false when it was already unlocked
/// or is missing from the snapshot.
pub(crate) fn unlock(state: &mut AppState, id: BadgeId, events: &mut Vec<Event>) -> bool {
    match state.badges.iter_mut().find(|b| b.id == id) {
        Some(badge) if !badge.unlocked => {
            badge.unlocked = true;
            events.push(Event::BadgeUnlocked { badge: id });
            true
        }
        _ => false,
    }
}

pub(crate) fn set_mood(state: &mut AppState, mood: Mood, events: &mut Vec<Event>) {
    let from = state.pet_status.mood;
    if from != mood {
        state.pet_status.mood = mood;
        events.push(Event::MoodChanged { from, to: mood });
    }
}

fn fresh_task_id(state: &AppState) -> String {
    loop {
        let id = format!("task-{}", Uuid::new_v4().simple());
        if state.task(&id).is_none() {
            return id;
        }
    }
}

fn add_study_minutes(state: &mut AppState, today: NaiveDate, minutes: u32, events: &mut Vec<Event>) {
    let total = match state.study_logs.iter_mut().find(|l| l.date == today) {
        Some(log) => {
            log.minutes = log.minutes.saturating_add(minutes);
            log.minutes
        }
        None => {
            state.study_logs.push(StudyLog { date: today, minutes });
            minutes
        }
    };
    events.push(Event::StudyLogged {
        date: today,
        minutes_added: minutes,
        total_minutes: total,
    });
}

fn increment_pomodoro(state: &mut AppState, events: &mut Vec<Event>) {
    state.pomodoros_completed = state.pomodoros_completed.saturating_add(1);
    events.push(Event::PomodoroCompleted {
        count: state.pomodoros_completed,
    });
    if state.pomodoros_completed == POMODORO_MASTER_COUNT {
        unlock(state, BadgeId::PomodoroMaster, events);
    }
}

fn spend(state: &mut AppState, amount: u64, events: &mut Vec<Event>) -> Result<(), ValidationError> {
    if state.catcoins < amount {
        return Err(ValidationError::InsufficientCatcoins {
            needed: amount,
            available: state.catcoins,
        });
    }
    state.catcoins -= amount;
    events.push(Event::CatcoinsSpent {
        amount,
        balance: state.catcoins,
    });
    Ok(())
}

fn add_accessory(state: &mut AppState, accessory: &str, events: &mut Vec<Event>) {
    state.pet_status.accessories.insert(accessory.to_string());
    events.push(Event::AccessoryAdded {
        accessory: accessory.to_string(),
    });
    set_mood(state, Mood::Happy, events);
}

const SAMPLE_SUBJECTS: [(Subject, u8); 5] = [
    (Subject::Math, 5),
    (Subject::English, 4),
    (Subject::History, 3),
    (Subject::Science, 4),
    (Subject::Geography, 2),
];

/// Returns how many tasks and study logs were seeded.
fn load_sample_data(state: &mut AppState, ctx: &mut OpContext<'_>) -> (usize, usize) {
    let mut seeded = (0, 0);

    if state.tasks.is_empty() {
        state.tasks = SAMPLE_SUBJECTS
            .iter()
            .enumerate()
            .map(|(i, (subject, priority))| Task {
                id: format!("default-task-{i}"),
                name: format!("Study {subject}"),
                subject: subject.clone(),
                due_date: ctx.today,
                priority: *priority,
                completed: false,
            })
            .collect();
        seeded.0 = state.tasks.len();
    }

    if state.study_logs.is_empty() {
        state.study_logs = (0..7u64)
            .rev()
            .filter_map(|back| ctx.today.checked_sub_days(Days::new(back)))
            .map(|date| StudyLog {
                date,
                minutes: ctx.rng.gen_range(30..150),
            })
            .collect();
        seeded.1 = state.study_logs.len();
    }

    seeded
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    fn run(state: &AppState, op: Operation) -> Transition {
        let mut rng = Pcg64::seed_from_u64(7);
        let mut ctx = OpContext {
            today: today(),
            rng: &mut rng,
        };
        transform(state, &op, &mut ctx)
    }

    fn add_task(state: &AppState, name: &str, subject: Subject) -> (AppState, String) {
        let t = run(
            state,
            Operation::AddTask(NewTask {
                name: name.into(),
                subject,
                due_date: today(),
                priority: 3,
            }),
        );
        assert!(t.status.is_applied());
        let id = t.state.tasks.last().unwrap().id.clone();
        (t.state, id)
    }

    #[test]
    fn add_task_assigns_unique_ids() {
        let (state, a) = add_task(&AppState::default(), "Algebra", Subject::Math);
        let (state, b) = add_task(&state, "Essay", Subject::English);
        assert_ne!(a, b);
        assert_eq!(state.tasks.len(), 2);
        assert!(!state.tasks[0].completed);
    }

    #[test]
    fn add_task_rejects_bad_input() {
        let state = AppState::default();
        let t = run(
            &state,
            Operation::AddTask(NewTask {
                name: "".into(),
                subject: Subject::Math,
                due_date: today(),
                priority: 3,
            }),
        );
        assert_eq!(t.status, OpStatus::Rejected(ValidationError::EmptyTaskName));
        assert_eq!(t.state, state);

        let t = run(
            &state,
            Operation::AddTask(NewTask {
                name: "x".into(),
                subject: Subject::Math,
                due_date: today(),
                priority: 6,
            }),
        );
        assert_eq!(t.status, OpStatus::Rejected(ValidationError::PriorityOutOfRange(6)));
    }

    #[test]
    fn complete_then_uncomplete_moves_ten_coins() {
        let (state, id) = add_task(&AppState::default(), "Algebra", Subject::Math);
        let done = run(&state, Operation::CompleteTask { id: id.clone() });
        assert_eq!(done.state.catcoins, 10);
        assert!(done.state.task(&id).unwrap().completed);
        assert!(done.changes.tasks);

        let undone = run(&done.state, Operation::UncompleteTask { id: id.clone() });
        assert_eq!(undone.state.catcoins, 0);
        assert!(!undone.state.task(&id).unwrap().completed);

        let again = run(&undone.state, Operation::UncompleteTask { id });
        assert!(again.status.is_applied());
        assert_eq!(again.state.catcoins, 0);
    }

    #[test]
    fn unknown_task_is_a_no_op() {
        let state = AppState::default();
        let t = run(&state, Operation::CompleteTask { id: "nope".into() });
        assert_eq!(t.status, OpStatus::Unchanged);
        assert_eq!(t.state.catcoins, 0);
    }

    #[test]
    fn study_minutes_accumulate_in_one_log() {
        let state = AppState::default();
        let first = run(&state, Operation::AddStudyMinutes { minutes: 20 });
        let second = run(&first.state, Operation::AddStudyMinutes { minutes: 15 });
        assert_eq!(second.state.study_logs.len(), 1);
        assert_eq!(second.state.minutes_on(today()), 35);
        assert!(second.changes.study_minutes_added);
    }

    #[test]
    fn zero_study_minutes_rejected() {
        let t = run(&AppState::default(), Operation::AddStudyMinutes { minutes: 0 });
        assert_eq!(t.status, OpStatus::Rejected(ValidationError::ZeroMinutes));
        assert!(t.state.study_logs.is_empty());
    }

    #[test]
    fn tenth_pomodoro_unlocks_master() {
        let mut state = AppState::default();
        for n in 1..=11 {
            state = run(&state, Operation::IncrementPomodoro).state;
            assert_eq!(state.pomodoros_completed, n);
            assert_eq!(state.is_unlocked(BadgeId::PomodoroMaster), n >= 10);
        }
    }

    #[test]
    fn pomodoro_master_only_on_exact_transition() {
        let mut state = AppState::default();
        state.pomodoros_completed = 10;
        let t = run(&state, Operation::IncrementPomodoro);
        assert!(!t.state.is_unlocked(BadgeId::PomodoroMaster));
    }

    #[test]
    fn spend_catcoins_checks_balance() {
        let mut state = AppState::default();
        state.catcoins = 30;

        let short = run(&state, Operation::SpendCatcoins { amount: 31 });
        assert!(matches!(
            short.status,
            OpStatus::Rejected(ValidationError::InsufficientCatcoins { needed: 31, available: 30 })
        ));
        assert_eq!(short.state.catcoins, 30);

        let exact = run(&state, Operation::SpendCatcoins { amount: 30 });
        assert!(exact.status.is_applied());
        assert_eq!(exact.state.catcoins, 0);
    }

    #[test]
    fn unlock_badge_is_idempotent() {
        let first = run(&AppState::default(), Operation::UnlockBadge { id: BadgeId::MathWizard });
        assert!(first.status.is_applied());
        assert_eq!(first.events, vec![Event::BadgeUnlocked { badge: BadgeId::MathWizard }]);

        let second = run(&first.state, Operation::UnlockBadge { id: BadgeId::MathWizard });
        assert_eq!(second.status, OpStatus::Unchanged);
        assert!(second.state.is_unlocked(BadgeId::MathWizard));
    }

    #[test]
    fn accessory_added_once_and_forces_happy() {
        let mut state = AppState::default();
        state.pet_status.mood = Mood::Sad;

        let first = run(&state, Operation::AddPetAccessory { accessory: "hat".into() });
        assert_eq!(first.state.pet_status.mood, Mood::Happy);
        assert_eq!(first.state.pet_status.accessories.len(), 1);

        let second = run(&first.state, Operation::AddPetAccessory { accessory: "hat".into() });
        assert_eq!(second.status, OpStatus::Unchanged);
        assert_eq!(second.state.pet_status.accessories.len(), 1);
        assert_eq!(second.state.pet_status.mood, Mood::Happy);
    }

    #[test]
    fn focus_session_counts_pomodoro_and_minutes() {
        let t = run(&AppState::default(), Operation::CompleteFocusSession);
        assert_eq!(t.state.pomodoros_completed, 1);
        assert_eq!(t.state.minutes_on(today()), 25);
        assert!(t.changes.study_minutes_added);
    }

    #[test]
    fn buy_accessory_spends_and_adds() {
        let mut state = AppState::default();
        state.catcoins = 45;

        let hat = run(&state, Operation::BuyAccessory { item: "hat".into() });
        assert!(matches!(hat.status, OpStatus::Rejected(ValidationError::InsufficientCatcoins { .. })));
        assert!(hat.state.pet_status.accessories.is_empty());

        let bowtie = run(&state, Operation::BuyAccessory { item: "bowtie".into() });
        assert!(bowtie.status.is_applied());
        assert_eq!(bowtie.state.catcoins, 5);
        assert!(bowtie.state.has_accessory("bowtie"));

        let again = run(&bowtie.state, Operation::BuyAccessory { item: "bowtie".into() });
        assert_eq!(again.status, OpStatus::Rejected(ValidationError::AlreadyOwned("bowtie".into())));
        assert_eq!(again.state.catcoins, 5);
    }

    #[test]
    fn sample_data_seeds_only_empty_slices() {
        let t = run(&AppState::default(), Operation::LoadSampleData);
        assert_eq!(t.state.tasks.len(), 5);
        assert_eq!(t.state.tasks[0].id, "default-task-0");
        assert_eq!(t.state.tasks[0].subject, Subject::Math);
        assert_eq!(t.state.study_logs.len(), 7);
        assert!(t
            .state
            .study_logs
            .iter()
            .all(|l| (30..150).contains(&l.minutes)));
        assert_eq!(t.state.study_logs.last().unwrap().date, today());

        let again = run(&t.state, Operation::LoadSampleData);
        assert_eq!(again.status, OpStatus::Unchanged);
    }
}
