//! Shared type definitions for the cricket skill.
//!
//! This module contains the per-turn input types and the transient fact
//! records derived from upstream payloads:
//! - Intent/Slot: the structured user request delivered by the platform
//! - SeriesSummary/SeriesStats: facts about one ongoing series
//! - TeamSummary: ranking, captaincy and coaching facts for one team

use crate::error::DialogueError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Slot name carrying the 1-based series number for series queries.
pub const SLOT_SERIES_NUMBER: &str = "SeriesNumber";

/// Slot name carrying the team name for team queries.
pub const SLOT_TEAM_NAME: &str = "TeamName";

/// A named slot value attached to an intent. The value may be absent when
/// the platform heard the slot but could not fill it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// One structured user request: an intent name from a closed set plus its
/// slot map. Immutable for the duration of the turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    /// Build an intent with no slots.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: HashMap::new(),
        }
    }

    /// Attach a filled slot (builder style, used heavily in tests).
    pub fn with_slot(mut self, name: &str, value: &str) -> Self {
        self.slots.insert(
            name.to_string(),
            Slot {
                name: name.to_string(),
                value: Some(value.to_string()),
            },
        );
        self
    }

    /// The filled value of a slot, if present.
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|s| s.value.as_deref())
    }

    /// Parse the required series-number slot.
    pub fn series_number(&self) -> Result<i64, DialogueError> {
        self.slot_value(SLOT_SERIES_NUMBER)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .ok_or(DialogueError::MissingSlot(SLOT_SERIES_NUMBER))
    }

    /// The required team-name slot, rejecting empty values.
    pub fn team_name(&self) -> Result<&str, DialogueError> {
        self.slot_value(SLOT_TEAM_NAME)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(DialogueError::MissingSlot(SLOT_TEAM_NAME))
    }
}

/// Win statistics for one series, computed over its match schedule.
///
/// `matches_scheduled` is the full schedule length, not the completed
/// count; `decided` is true once at least one match has concluded. Ties
/// and matches with no recorded winner contribute to neither win counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub matches_scheduled: usize,
    pub team_a_wins: u32,
    pub team_b_wins: u32,
    pub decided: bool,
}

/// Facts about one ongoing series. `number` is the 1-based position in
/// the upstream series list, as spoken to the user. `stats` is only
/// populated by the series-detail query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub number: usize,
    pub match_type: String,
    pub team_a: String,
    pub team_b: String,
    pub stats: Option<SeriesStats>,
}

/// One ranking entry: position within one match-type's world ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    pub position: String,
    pub match_type: String,
}

/// A person attached to a team role, optionally scoped to a match type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamPerson {
    pub first_name: String,
    pub last_name: String,
    pub match_type: Option<String>,
}

/// Facts about one team: rankings, captains and the coach, in upstream
/// payload order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSummary {
    pub name: String,
    pub rankings: Vec<RankingEntry>,
    pub captains: Vec<TeamPerson>,
    pub coach: TeamPerson,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_number_parses_trimmed_digits() {
        let intent = Intent::named("SeriesInfoIntent").with_slot(SLOT_SERIES_NUMBER, " 3 ");
        assert_eq!(intent.series_number().unwrap(), 3);
    }

    #[test]
    fn series_number_rejects_non_numeric_value() {
        let intent = Intent::named("SeriesInfoIntent").with_slot(SLOT_SERIES_NUMBER, "third");
        assert!(matches!(
            intent.series_number(),
            Err(DialogueError::MissingSlot(SLOT_SERIES_NUMBER))
        ));
    }

    #[test]
    fn series_number_rejects_absent_slot() {
        let intent = Intent::named("SeriesInfoIntent");
        assert!(intent.series_number().is_err());
    }

    #[test]
    fn team_name_rejects_empty_value() {
        let intent = Intent::named("TeamInfoIntent").with_slot(SLOT_TEAM_NAME, "  ");
        assert!(matches!(
            intent.team_name(),
            Err(DialogueError::MissingSlot(SLOT_TEAM_NAME))
        ));
    }

    #[test]
    fn team_name_trims_whitespace() {
        let intent = Intent::named("TeamInfoIntent").with_slot(SLOT_TEAM_NAME, " India ");
        assert_eq!(intent.team_name().unwrap(), "India");
    }
}
