//! Fact extraction over parsed upstream payloads.
//!
//! Pure functions: they never fetch, never retry, and fail with
//! `DataError::Missing` when the payload does not carry the fields they
//! need. Both query shapes come wrapped as `{"query": {"count": N,
//! "results": {...}}}`.

use crate::error::DataError;
use crate::types::{RankingEntry, SeriesStats, SeriesSummary, TeamPerson, TeamSummary};
use serde_json::Value;

/// A match schedule entry with this status has concluded.
const MATCH_STATUS_COMPLETED: &str = "post";

/// All ongoing series, in payload order, without win statistics.
/// The 1-based `number` of each summary is its position in that order.
pub fn list_ongoing_series(payload: &Value) -> Result<Vec<SeriesSummary>, DataError> {
    let series = series_array(payload)?;

    series
        .iter()
        .enumerate()
        .map(|(i, entry)| summarize_series(entry, i + 1))
        .collect()
}

/// The series at the given 1-based number, with win statistics computed
/// over its match schedule.
///
/// Fails with `OutOfRange` for numbers at or below zero or beyond the
/// series count. A team's win is attributed only when that team's own
/// result slot records `matchwon == "yes"`; ties and matches with no
/// recorded winner count for neither side.
pub fn series_detail(payload: &Value, number: i64) -> Result<SeriesSummary, DataError> {
    let series = series_array(payload)?;

    if number <= 0 || number as usize > series.len() {
        return Err(DataError::OutOfRange {
            number,
            count: series.len(),
        });
    }

    let index = number as usize;
    let entry = &series[index - 1];
    let mut summary = summarize_series(entry, index)?;

    let team_a_id = team_field(entry, index, 0, "teamid")?;
    let team_b_id = team_field(entry, index, 1, "teamid")?;

    let matches = entry["Schedule"]["Match"]
        .as_array()
        .ok_or_else(|| DataError::missing(format!("Series[{}].Schedule.Match", index)))?;

    let mut stats = SeriesStats {
        matches_scheduled: matches.len(),
        team_a_wins: 0,
        team_b_wins: 0,
        decided: false,
    };

    for m in matches {
        if m["status"].as_str() != Some(MATCH_STATUS_COMPLETED) {
            continue;
        }
        stats.decided = true;

        // One result slot per participant; a slot with no id or no
        // "matchwon": "yes" marker is silently uncounted.
        let slots = m["Result"]["Team"].as_array().map(Vec::as_slice).unwrap_or(&[]);
        for slot in slots {
            if slot["matchwon"].as_str() != Some("yes") {
                continue;
            }
            if slot["id"] == *team_a_id {
                stats.team_a_wins += 1;
            } else if slot["id"] == *team_b_id {
                stats.team_b_wins += 1;
            }
        }
    }

    summary.stats = Some(stats);
    Ok(summary)
}

/// Ranking, captaincy and coaching facts for the single team in a
/// name-filtered payload.
pub fn team_detail(payload: &Value, team_name: &str) -> Result<TeamSummary, DataError> {
    let team = &payload["query"]["results"]["Team"];
    if team.is_null() {
        return Err(DataError::missing("query.results.Team"));
    }

    let rankings = team["Ranking"]
        .as_array()
        .ok_or_else(|| DataError::missing("Team.Ranking"))?
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Ok(RankingEntry {
                position: string_field(r, &format!("Team.Ranking[{}].content", i), "content")?,
                match_type: string_field(r, &format!("Team.Ranking[{}].mtype", i), "mtype")?,
            })
        })
        .collect::<Result<Vec<_>, DataError>>()?;

    let captains = team["Captain"]
        .as_array()
        .ok_or_else(|| DataError::missing("Team.Captain"))?
        .iter()
        .enumerate()
        .map(|(i, c)| person(c, &format!("Team.Captain[{}]", i), true))
        .collect::<Result<Vec<_>, DataError>>()?;

    let coach = person(&team["Coach"], "Team.Coach", false)?;

    Ok(TeamSummary {
        name: team_name.to_string(),
        rankings,
        captains,
        coach,
    })
}

fn series_array(payload: &Value) -> Result<&Vec<Value>, DataError> {
    payload["query"]["results"]["Series"]
        .as_array()
        .ok_or_else(|| DataError::missing("query.results.Series"))
}

/// Teams, match type and display number for one series entry.
fn summarize_series(entry: &Value, number: usize) -> Result<SeriesSummary, DataError> {
    Ok(SeriesSummary {
        number,
        match_type: string_field(
            &entry["Participant"],
            &format!("Series[{}].Participant.mtype", number),
            "mtype",
        )?,
        team_a: team_name(entry, number, 0)?,
        team_b: team_name(entry, number, 1)?,
        stats: None,
    })
}

fn team_name(entry: &Value, number: usize, slot: usize) -> Result<String, DataError> {
    team_field(entry, number, slot, "Name")?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            DataError::missing(format!(
                "Series[{}].Participant.Team[{}].Name",
                number, slot
            ))
        })
}

/// The raw value of one field of one participant team.
fn team_field<'a>(
    entry: &'a Value,
    number: usize,
    slot: usize,
    field: &str,
) -> Result<&'a Value, DataError> {
    let value = &entry["Participant"]["Team"][slot][field];
    if value.is_null() {
        return Err(DataError::missing(format!(
            "Series[{}].Participant.Team[{}].{}",
            number, slot, field
        )));
    }
    Ok(value)
}

fn string_field(value: &Value, path: &str, field: &str) -> Result<String, DataError> {
    value[field]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DataError::missing(path))
}

fn person(value: &Value, path: &str, with_match_type: bool) -> Result<TeamPerson, DataError> {
    let match_type = if with_match_type {
        Some(string_field(value, &format!("{}.mtype", path), "mtype")?)
    } else {
        None
    };

    Ok(TeamPerson {
        first_name: string_field(value, &format!("{}.FirstName", path), "FirstName")?,
        last_name: string_field(value, &format!("{}.LastName", path), "LastName")?,
        match_type,
    })
}
