//! Achievement badges.
//!
//! The catalog is static: five badges, all locked in a fresh state. A badge's
//! `unlocked` flag only ever moves from `false` to `true`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Identifier of a badge in the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeId {
    /// Studied before 6 AM.
    EarlyBird,
    /// Completed 10 pomodoros.
    PomodoroMaster,
    /// Studied seven days in a row.
    ConsistentLearner,
    /// Completed 20 math tasks.
    MathWizard,
    /// Studied two hours on a day, checked after 10 PM.
    NightOwl,
}

impl BadgeId {
    pub const ALL: [BadgeId; 5] = [
        BadgeId::EarlyBird,
        BadgeId::PomodoroMaster,
        BadgeId::ConsistentLearner,
        BadgeId::MathWizard,
        BadgeId::NightOwl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeId::EarlyBird => "early-bird",
            BadgeId::PomodoroMaster => "pomodoro-master",
            BadgeId::ConsistentLearner => "consistent-learner",
            BadgeId::MathWizard => "math-wizard",
            BadgeId::NightOwl => "night-owl",
        }
    }

    fn details(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            BadgeId::EarlyBird => ("Early Bird", "Start studying before 6 AM", "🌅"),
            BadgeId::PomodoroMaster => ("Pomodoro Master", "Complete 10 pomodoros", "🍅"),
            BadgeId::ConsistentLearner => {
                ("Consistent Learner", "Study seven days in a row", "📚")
            }
            BadgeId::MathWizard => ("Math Wizard", "Complete 20 math tasks", "🧮"),
            BadgeId::NightOwl => ("Night Owl", "Study 2 hours, still going after 10 PM", "🦉"),
        }
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BadgeId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ValidationError::Unknown {
                kind: "badge",
                value: s.to_string(),
            })
    }
}

/// An achievement definition together with its unlock state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: BadgeId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
}

impl Badge {
    /// Locked catalog entry for `id`.
    pub fn locked(id: BadgeId) -> Self {
        let (name, description, icon) = id.details();
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            unlocked: false,
        }
    }
}

/// The full catalog, every badge locked, in display order.
pub fn catalog() -> Vec<Badge> {
    BadgeId::ALL.into_iter().map(Badge::locked).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_five_locked_badges() {
        let badges = catalog();
        assert_eq!(badges.len(), 5);
        assert!(badges.iter().all(|b| !b.unlocked));
        assert_eq!(badges[1].id, BadgeId::PomodoroMaster);
    }

    #[test]
    fn badge_id_parses_kebab_case() {
        assert_eq!("night-owl".parse::<BadgeId>().unwrap(), BadgeId::NightOwl);
        assert!("nightowl".parse::<BadgeId>().is_err());
    }

    #[test]
    fn badge_id_serializes_as_catalog_key() {
        let json = serde_json::to_string(&BadgeId::ConsistentLearner).unwrap();
        assert_eq!(json, "\"consistent-learner\"");
    }
}
