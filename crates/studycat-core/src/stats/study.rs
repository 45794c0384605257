//! Study time summaries and chart series.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::evaluators;
use crate::model::{AppState, StudyLog};

/// Overall study statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudySummary {
    /// Sum of all logged minutes
    pub total_minutes: u64,
    /// Total in hours, one decimal
    pub total_hours: f64,
    /// Average minutes per logged day, rounded
    pub average_minutes: u64,
    /// Number of days with a study log
    pub logged_days: usize,
    /// Consecutive days ending today with a log
    pub streak: u32,
    pub pomodoros_completed: u32,
    pub tasks_completed: usize,
    pub tasks_total: usize,
    /// Tasks due today and how many of them are done
    pub tasks_due_today: usize,
    pub tasks_due_today_completed: usize,
    pub badges_unlocked: usize,
    pub badges_total: usize,
}

impl StudySummary {
    pub fn compute(state: &AppState, today: NaiveDate) -> Self {
        let total_minutes: u64 = state.study_logs.iter().map(|l| u64::from(l.minutes)).sum();
        let logged_days = state.study_logs.len();
        let average_minutes = if logged_days == 0 {
            0
        } else {
            (total_minutes as f64 / logged_days as f64).round() as u64
        };
        let due_today: Vec<_> = state.tasks.iter().filter(|t| t.due_date == today).collect();

        Self {
            total_minutes,
            total_hours: round1(total_minutes as f64 / 60.0),
            average_minutes,
            logged_days,
            streak: evaluators::streak(state, today),
            pomodoros_completed: state.pomodoros_completed,
            tasks_completed: state.tasks.iter().filter(|t| t.completed).count(),
            tasks_total: state.tasks.len(),
            tasks_due_today: due_today.len(),
            tasks_due_today_completed: due_today.iter().filter(|t| t.completed).count(),
            badges_unlocked: state.badges.iter().filter(|b| b.unlocked).count(),
            badges_total: state.badges.len(),
        }
    }
}

/// Window of the study chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartPeriod {
    /// The seven days ending today
    #[default]
    Week,
    /// Dates after the same day last month
    Month,
    All,
}

impl ChartPeriod {
    /// Earliest date included in the period, `None` for all time.
    pub fn start(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            ChartPeriod::Week => today.checked_sub_days(Days::new(6)),
            ChartPeriod::Month => today
                .checked_sub_months(Months::new(1))
                .and_then(|d| d.checked_add_days(Days::new(1))),
            ChartPeriod::All => None,
        }
    }
}

impl FromStr for ChartPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(ChartPeriod::Week),
            "month" => Ok(ChartPeriod::Month),
            "all" => Ok(ChartPeriod::All),
            _ => Err(ValidationError::Unknown {
                kind: "chart period",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartPeriod::Week => "week",
            ChartPeriod::Month => "month",
            ChartPeriod::All => "all",
        })
    }
}

/// Study logs for one chart period, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyChart {
    pub period: ChartPeriod,
    pub logs: Vec<StudyLog>,
    pub total_minutes: u64,
    pub total_hours: f64,
    /// Average over the days shown, one decimal
    pub average_minutes: f64,
    pub max_minutes: u32,
}

impl StudyChart {
    pub fn compute(state: &AppState, period: ChartPeriod, today: NaiveDate) -> Self {
        let start = period.start(today);
        let mut logs: Vec<StudyLog> = state
            .study_logs
            .iter()
            .filter(|l| start.map_or(true, |s| l.date >= s))
            .copied()
            .collect();
        logs.sort_by_key(|l| l.date);

        let total_minutes: u64 = logs.iter().map(|l| u64::from(l.minutes)).sum();
        let average_minutes = if logs.is_empty() {
            0.0
        } else {
            round1(total_minutes as f64 / logs.len() as f64)
        };
        let max_minutes = logs.iter().map(|l| l.minutes).max().unwrap_or(0);

        Self {
            period,
            logs,
            total_minutes,
            total_hours: round1(total_minutes as f64 / 60.0),
            average_minutes,
            max_minutes,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
