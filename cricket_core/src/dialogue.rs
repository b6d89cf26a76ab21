//! Multi-turn dialogue state machine.
//!
//! Owns the conversation-level state and maps (current state, incoming
//! intent) to (next state, data query, reply). One suspension point per
//! turn at the data-fetch boundary; no locking, the platform delivers at
//! most one in-flight turn per session.
//!
//! Transition ladder driven by the generic continue intent:
//!   OngoingSeriesSummary -> SpecificSeriesSummary
//!     -> SpecificSeriesSummaryGetSeriesNumber
//!     -> SpecificTeamSummaryGetTeamName -> SpecificTeamSummary -> end.
//!
//! The two one-shot intents (series info, team info) bypass the ladder
//! entirely and reply terminally.

use crate::clients::CricketDataSource;
use crate::error::{DataError, DialogueError};
use crate::extract;
use crate::reply::{self, Reply, DATA_ERROR_SPEECH};
use crate::types::Intent;
use log::warn;
use serde_json::Value;

/// Session-attribute key holding the dialogue state between turns.
pub const SESSION_STATE_ATTRIBUTE: &str = "level";

/// Terminal reply when a series-number slot is absent or unparsable.
pub const INVALID_SERIES_NUMBER_SPEECH: &str =
    "Sorry, I did not get a valid series number. Please try again.";

/// Terminal reply when a team-name slot is absent or empty.
pub const INVALID_TEAM_NAME_SPEECH: &str =
    "Sorry, I did not get a team name. Please try again.";

const ASK_SERIES_DETAILS: &str = "Do you want to get details of any series?";
const ASK_TEAM_DETAIL: &str = "Do you want to get detail of any team?";
const ASK_SERIES_NUMBER: &str = "Give me series number?";
const ASK_TEAM_NAME: &str = "Give me team name?";

/// Conversation-level state, a closed set. Any value outside it found in
/// the session record is a fatal per-turn error, never silently defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    OngoingSeriesSummary,
    SpecificSeriesSummary,
    SpecificSeriesSummaryGetSeriesNumber,
    SpecificTeamSummaryGetTeamName,
    SpecificTeamSummary,
}

impl DialogueState {
    /// Stable name stored in the session attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogueState::OngoingSeriesSummary => "ONGOING_SERIES_SUMMARY",
            DialogueState::SpecificSeriesSummary => "SPECIFIC_SERIES_SUMMARY",
            DialogueState::SpecificSeriesSummaryGetSeriesNumber => {
                "SPECIFIC_SERIES_SUMMARY_GET_SERIES_NUMBER"
            }
            DialogueState::SpecificTeamSummaryGetTeamName => {
                "SPECIFIC_TEAM_SUMMARY_GET_TEAM_NAME"
            }
            DialogueState::SpecificTeamSummary => "SPECIFIC_TEAM_SUMMARY",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ONGOING_SERIES_SUMMARY" => Some(DialogueState::OngoingSeriesSummary),
            "SPECIFIC_SERIES_SUMMARY" => Some(DialogueState::SpecificSeriesSummary),
            "SPECIFIC_SERIES_SUMMARY_GET_SERIES_NUMBER" => {
                Some(DialogueState::SpecificSeriesSummaryGetSeriesNumber)
            }
            "SPECIFIC_TEAM_SUMMARY_GET_TEAM_NAME" => {
                Some(DialogueState::SpecificTeamSummaryGetTeamName)
            }
            "SPECIFIC_TEAM_SUMMARY" => Some(DialogueState::SpecificTeamSummary),
            _ => None,
        }
    }
}

impl Default for DialogueState {
    fn default() -> Self {
        DialogueState::OngoingSeriesSummary
    }
}

impl std::fmt::Display for DialogueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The per-conversation record: created at session start, mutated once
/// per turn, discarded at session end. The platform owns persistence;
/// this is only the `state` field it carries for us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    pub state: DialogueState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from the stored session attribute. An absent attribute
    /// means a fresh conversation; anything other than a known state name
    /// is fatal for the turn.
    pub fn from_attribute(value: Option<&Value>) -> Result<Self, DialogueError> {
        let value = match value {
            None | Some(Value::Null) => return Ok(Self::new()),
            Some(v) => v,
        };

        let state = value
            .as_str()
            .and_then(DialogueState::from_name)
            .ok_or_else(|| DialogueError::UnknownState(raw_attribute(value)))?;

        Ok(Self { state })
    }

    /// The value to store back into the session attribute.
    pub fn attribute_value(&self) -> Value {
        Value::String(self.state.as_str().to_string())
    }
}

/// Render a bad attribute for the `unknown level` reply without JSON
/// string quoting.
fn raw_attribute(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// Drives one conversation turn against a data source.
pub struct DialogueEngine<S> {
    source: S,
}

impl<S: CricketDataSource> DialogueEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Handle the generic continue intent: ask the next question or give
    /// the final answer, advancing `session.state`.
    pub async fn continue_turn(&self, session: &mut Session, intent: &Intent) -> Reply {
        match session.state {
            DialogueState::OngoingSeriesSummary => self.list_series_turn(session).await,
            DialogueState::SpecificSeriesSummary => {
                session.state = DialogueState::SpecificSeriesSummaryGetSeriesNumber;
                Reply::ask_with_card(&format!("<p>{}</p>", ASK_SERIES_NUMBER))
            }
            DialogueState::SpecificSeriesSummaryGetSeriesNumber => {
                self.series_detail_turn(session, intent).await
            }
            DialogueState::SpecificTeamSummaryGetTeamName => {
                session.state = DialogueState::SpecificTeamSummary;
                Reply::ask_with_card(&format!("<p>{}</p>", ASK_TEAM_NAME))
            }
            DialogueState::SpecificTeamSummary => self.team_turn(intent).await,
        }
    }

    /// One-shot series detail: requires the series-number slot, replies
    /// terminally, touches no session state.
    pub async fn series_info(&self, intent: &Intent) -> Reply {
        let number = match intent.series_number() {
            Ok(n) => n,
            Err(e) => return slot_failure(e, INVALID_SERIES_NUMBER_SPEECH),
        };

        match self.fetch_series_detail(number).await {
            Ok(speech) => Reply::tell_with_card(speech),
            Err(e) => data_failure(e),
        }
    }

    /// One-shot team detail: requires the team-name slot, replies
    /// terminally, touches no session state.
    pub async fn team_info(&self, intent: &Intent) -> Reply {
        let name = match intent.team_name() {
            Ok(n) => n,
            Err(e) => return slot_failure(e, INVALID_TEAM_NAME_SPEECH),
        };

        match self.fetch_team_speech(name).await {
            Ok(speech) => Reply::tell_with_card(speech),
            Err(e) => data_failure(e),
        }
    }

    async fn list_series_turn(&self, session: &mut Session) -> Reply {
        let series = match self
            .source
            .ongoing_series()
            .await
            .and_then(|p| extract::list_ongoing_series(&p))
        {
            Ok(series) => series,
            Err(e) => return data_failure(e),
        };

        if series.is_empty() {
            warn!("no ongoing series in payload");
            return Reply::tell(DATA_ERROR_SPEECH);
        }

        session.state = DialogueState::SpecificSeriesSummary;
        Reply::ask_with_card(&format!(
            "<p>{}</p><p>{}</p>",
            reply::series_list_speech(&series),
            ASK_SERIES_DETAILS
        ))
    }

    async fn series_detail_turn(&self, session: &mut Session, intent: &Intent) -> Reply {
        let number = match intent.series_number() {
            Ok(n) => n,
            Err(e) => return slot_failure(e, INVALID_SERIES_NUMBER_SPEECH),
        };

        let speech = match self.fetch_series_detail(number).await {
            Ok(speech) => speech,
            Err(e) => return data_failure(e),
        };

        session.state = DialogueState::SpecificTeamSummaryGetTeamName;
        Reply::ask_with_card(&format!("<p>{}</p><p>{}</p>", speech, ASK_TEAM_DETAIL))
    }

    async fn team_turn(&self, intent: &Intent) -> Reply {
        let name = match intent.team_name() {
            Ok(n) => n,
            Err(e) => return slot_failure(e, INVALID_TEAM_NAME_SPEECH),
        };

        match self.fetch_team_speech(name).await {
            Ok(speech) => Reply::tell(speech),
            Err(e) => data_failure(e),
        }
    }

    async fn fetch_series_detail(&self, number: i64) -> Result<String, DataError> {
        let payload = self.source.ongoing_series().await?;
        let summary = extract::series_detail(&payload, number)?;
        Ok(reply::series_detail_speech(&summary))
    }

    async fn fetch_team_speech(&self, name: &str) -> Result<String, DataError> {
        let payload = self.source.team(name).await?;
        let team = extract::team_detail(&payload, name)?;
        Ok(reply::team_speech(&team))
    }
}

/// Every upstream failure collapses into the same terminal reply.
fn data_failure(err: DataError) -> Reply {
    warn!("data fetch failed: {}", err);
    Reply::tell(DATA_ERROR_SPEECH)
}

/// A bad required slot aborts the turn with an explicit terminal reply
/// instead of stalling silently.
fn slot_failure(err: DialogueError, speech: &str) -> Reply {
    warn!("slot failure: {}", err);
    Reply::tell(speech)
}
