//! Data model: the aggregate `AppState` and the records it owns.
//!
//! Serialized field names use camelCase so a persisted snapshot keeps the
//! document shape the web client stored (`studyLogs`, `petStatus`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::badges::{self, Badge, BadgeId};
use crate::error::ValidationError;

/// Study subject of a task.
///
/// A closed set of categories plus free text. Parsing is case-insensitive and
/// also accepts the Traditional Chinese labels used by the web client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Subject {
    Math,
    English,
    Science,
    History,
    Geography,
    Other,
    Custom(String),
}

impl Subject {
    /// The fixed categories, in form order.
    pub const CATEGORIES: [Subject; 6] = [
        Subject::Math,
        Subject::English,
        Subject::Science,
        Subject::History,
        Subject::Geography,
        Subject::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Subject::Math => "Math",
            Subject::English => "English",
            Subject::Science => "Science",
            Subject::History => "History",
            Subject::Geography => "Geography",
            Subject::Other => "Other",
            Subject::Custom(s) => s,
        }
    }
}

impl From<String> for Subject {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "math" | "數學" => Subject::Math,
            "english" | "英文" => Subject::English,
            "science" | "科學" => Subject::Science,
            "history" | "歷史" => Subject::History,
            "geography" | "地理" => Subject::Geography,
            "other" | "其他" => Subject::Other,
            _ => Subject::Custom(s),
        }
    }
}

impl From<&str> for Subject {
    fn from(s: &str) -> Self {
        Subject::from(s.to_string())
    }
}

impl From<Subject> for String {
    fn from(s: Subject) -> Self {
        match s {
            Subject::Custom(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl FromStr for Subject {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Subject::from(s))
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of study work. Never deleted; only `completed` changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub subject: Subject,
    pub due_date: NaiveDate,
    /// 1-5, 5 is highest.
    pub priority: u8,
    pub completed: bool,
}

/// Fields supplied by the caller when adding a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub name: String,
    pub subject: Subject,
    pub due_date: NaiveDate,
    pub priority: u8,
}

impl NewTask {
    pub const MIN_PRIORITY: u8 = 1;
    pub const MAX_PRIORITY: u8 = 5;

    /// Check the AddTask preconditions.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyTaskName);
        }
        if !(Self::MIN_PRIORITY..=Self::MAX_PRIORITY).contains(&self.priority) {
            return Err(ValidationError::PriorityOutOfRange(self.priority));
        }
        Ok(())
    }
}

/// Aggregate minutes studied on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyLog {
    pub date: NaiveDate,
    pub minutes: u32,
}

/// Pet mood, derived from study activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    #[default]
    Neutral,
    Sad,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PetStatus {
    pub mood: Mood,
    pub accessories: BTreeSet<String>,
}

/// The aggregate root. One instance per session, owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub tasks: Vec<Task>,
    pub study_logs: Vec<StudyLog>,
    pub catcoins: u64,
    pub badges: Vec<Badge>,
    pub pet_status: PetStatus,
    pub pomodoros_completed: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            study_logs: Vec::new(),
            catcoins: 0,
            badges: badges::catalog(),
            pet_status: PetStatus::default(),
            pomodoros_completed: 0,
        }
    }
}

impl AppState {
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn log_for(&self, date: NaiveDate) -> Option<&StudyLog> {
        self.study_logs.iter().find(|l| l.date == date)
    }

    /// Minutes logged on `date`, zero when there is no log.
    pub fn minutes_on(&self, date: NaiveDate) -> u32 {
        self.log_for(date).map_or(0, |l| l.minutes)
    }

    pub fn badge(&self, id: BadgeId) -> Option<&Badge> {
        self.badges.iter().find(|b| b.id == id)
    }

    pub fn is_unlocked(&self, id: BadgeId) -> bool {
        self.badge(id).is_some_and(|b| b.unlocked)
    }

    pub fn has_accessory(&self, accessory: &str) -> bool {
        self.pet_status.accessories.contains(accessory)
    }
}
