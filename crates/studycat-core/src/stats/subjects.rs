//! Subject distribution of completed tasks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{AppState, Subject};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectShare {
    pub subject: Subject,
    pub count: usize,
    /// Share of all completed tasks, rounded to a whole percent
    pub percentage: u32,
}

/// Completed tasks grouped by subject, largest group first.
///
/// Ties are ordered by subject name so the output is stable.
pub fn subject_distribution(state: &AppState) -> Vec<SubjectShare> {
    let mut counts: HashMap<&Subject, usize> = HashMap::new();
    let mut completed = 0usize;
    for task in state.tasks.iter().filter(|t| t.completed) {
        *counts.entry(&task.subject).or_default() += 1;
        completed += 1;
    }

    let mut shares: Vec<SubjectShare> = counts
        .into_iter()
        .map(|(subject, count)| SubjectShare {
            subject: subject.clone(),
            count,
            percentage: (count as f64 / completed as f64 * 100.0).round() as u32,
        })
        .collect();
    shares.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.subject.as_str().cmp(b.subject.as_str()))
    });
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use chrono::NaiveDate;

    fn task(id: &str, subject: Subject, completed: bool) -> Task {
        Task {
            id: id.into(),
            name: id.into(),
            subject,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            priority: 3,
            completed,
        }
    }

    #[test]
    fn groups_completed_tasks_by_subject() {
        let mut state = AppState::default();
        state.tasks = vec![
            task("a", Subject::Math, true),
            task("b", Subject::Math, true),
            task("c", Subject::English, true),
            task("d", Subject::English, false),
            task("e", Subject::Custom("Music".into()), false),
        ];

        let dist = subject_distribution(&state);
        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].subject, Subject::Math);
        assert_eq!(dist[0].count, 2);
        assert_eq!(dist[0].percentage, 67);
        assert_eq!(dist[1].subject, Subject::English);
        assert_eq!(dist[1].percentage, 33);
    }

    #[test]
    fn empty_without_completed_tasks() {
        let mut state = AppState::default();
        state.tasks.push(task("a", Subject::Math, false));
        assert!(subject_distribution(&state).is_empty());
    }
}
