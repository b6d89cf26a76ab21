//! Reply rendering: extracted facts + template -> platform output shape.
//!
//! A reply is terminal exactly when it carries no reprompt; a terminal
//! reply may still carry a card. `SpeechStyle::Markup` wraps the text in
//! the platform's spoken-markup delimiters.

use crate::types::{SeriesSummary, TeamSummary};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Card title for every visual reply.
pub const CARD_TITLE: &str = "Cricket";

/// Fixed terminal reply for any upstream data failure.
pub const DATA_ERROR_SPEECH: &str =
    "There is a problem in getting data. Please try again later. Thanks!";

/// Standing reprompt used through the multi-turn dialogue.
pub const SKILL_REPROMPT: &str = "With Cricket Skill, you can get up to date news of cricket sport.";

/// How the speech text is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechStyle {
    Plain,
    Markup,
}

/// Rendered speech content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speech {
    Plain(String),
    Ssml(String),
}

impl Speech {
    /// The spoken text, markup included.
    pub fn text(&self) -> &str {
        match self {
            Speech::Plain(t) | Speech::Ssml(t) => t,
        }
    }
}

/// Visual supplement shown in the companion app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub content: String,
}

/// The computed output of one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub speech: Speech,
    pub reprompt: Option<String>,
    pub card: Option<Card>,
    pub end_session: bool,
}

impl Reply {
    pub fn is_terminal(&self) -> bool {
        self.end_session
    }

    /// Terminal plain-text reply.
    pub fn tell(text: impl Into<String>) -> Self {
        render(&text.into(), SpeechStyle::Plain, None, None)
    }

    /// Terminal plain-text reply with a card.
    pub fn tell_with_card(text: impl Into<String>) -> Self {
        let text = text.into();
        let card = Card {
            title: CARD_TITLE.to_string(),
            content: text.clone(),
        };
        render(&text, SpeechStyle::Plain, None, Some(card))
    }

    /// Non-terminal marked-up question with the standing reprompt.
    pub fn ask(text: &str) -> Self {
        render(text, SpeechStyle::Markup, Some(SKILL_REPROMPT), None)
    }

    /// Non-terminal marked-up question with the standing reprompt and a
    /// card mirroring the speech.
    pub fn ask_with_card(text: &str) -> Self {
        let card = Card {
            title: CARD_TITLE.to_string(),
            content: text.to_string(),
        };
        render(text, SpeechStyle::Markup, Some(SKILL_REPROMPT), Some(card))
    }
}

/// Wrap speech content for delivery. Omitting the reprompt produces a
/// terminal reply; a reply with a reprompt is always non-terminal.
pub fn render(
    text: &str,
    style: SpeechStyle,
    reprompt: Option<&str>,
    card: Option<Card>,
) -> Reply {
    let speech = match style {
        SpeechStyle::Plain => Speech::Plain(text.to_string()),
        SpeechStyle::Markup => Speech::Ssml(format!("<speak>{}</speak>", text)),
    };

    Reply {
        speech,
        end_session: reprompt.is_none(),
        reprompt: reprompt.map(str::to_string),
        card,
    }
}

/// One sentence per ongoing series, preceded by the series count.
pub fn series_list_speech(series: &[SeriesSummary]) -> String {
    let mut speech = format!(" {} series going on in cricket. ", series.len());
    for s in series {
        let _ = write!(
            speech,
            "{}). {} matches between {} and {}. ",
            s.number, s.match_type, s.team_a, s.team_b
        );
    }
    speech
}

/// The state of one series: who is playing, and the win tally once at
/// least one match has concluded.
pub fn series_detail_speech(series: &SeriesSummary) -> String {
    let mut speech = format!(
        "{} and {} are playing this {} matches series. ",
        series.team_a, series.team_b, series.match_type
    );

    match &series.stats {
        Some(stats) if stats.decided => {
            let _ = write!(
                speech,
                " {} matches have been played. ",
                stats.matches_scheduled
            );
            let _ = write!(
                speech,
                " Where {} has won {}. ",
                series.team_a, stats.team_a_wins
            );
            let _ = write!(
                speech,
                " And {} has won {} matches. ",
                series.team_b, stats.team_b_wins
            );
        }
        _ => speech.push_str(" No match is yet concluded."),
    }

    speech
}

/// Ranking sentences, then captain sentences, then the coach sentence.
pub fn team_speech(team: &TeamSummary) -> String {
    let mut speech = String::new();

    for r in &team.rankings {
        let _ = write!(
            speech,
            "Team is at position number {} in {} cricket world. ",
            r.position, r.match_type
        );
    }

    for c in &team.captains {
        let _ = write!(
            speech,
            "{} {} is captain for {} cricket world. ",
            c.first_name,
            c.last_name,
            c.match_type.as_deref().unwrap_or("")
        );
    }

    let _ = write!(
        speech,
        "{} {} is coach for the team.",
        team.coach.first_name, team.coach.last_name
    );

    speech
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RankingEntry, SeriesStats, TeamPerson};

    fn series(decided: bool) -> SeriesSummary {
        SeriesSummary {
            number: 1,
            match_type: "ODI".to_string(),
            team_a: "India".to_string(),
            team_b: "Australia".to_string(),
            stats: Some(SeriesStats {
                matches_scheduled: 3,
                team_a_wins: if decided { 2 } else { 0 },
                team_b_wins: if decided { 1 } else { 0 },
                decided,
            }),
        }
    }

    #[test]
    fn markup_style_wraps_in_speak_tags() {
        let reply = render("<p>Hi.</p>", SpeechStyle::Markup, Some("again?"), None);
        assert_eq!(reply.speech.text(), "<speak><p>Hi.</p></speak>");
    }

    #[test]
    fn reply_without_reprompt_is_terminal() {
        assert!(Reply::tell("Goodbye").is_terminal());
        assert!(Reply::tell_with_card("Done").is_terminal());
    }

    #[test]
    fn reply_with_reprompt_is_never_terminal() {
        let reply = Reply::ask("<p>More?</p>");
        assert!(!reply.is_terminal());
        assert_eq!(reply.reprompt.as_deref(), Some(SKILL_REPROMPT));
    }

    #[test]
    fn ask_with_card_mirrors_speech_on_card() {
        let reply = Reply::ask_with_card("<p>More?</p>");
        let card = reply.card.unwrap();
        assert_eq!(card.title, CARD_TITLE);
        assert_eq!(card.content, "<p>More?</p>");
    }

    #[test]
    fn series_list_speech_counts_and_numbers_entries() {
        let list = vec![
            SeriesSummary {
                number: 1,
                match_type: "ODI".to_string(),
                team_a: "India".to_string(),
                team_b: "Australia".to_string(),
                stats: None,
            },
            SeriesSummary {
                number: 2,
                match_type: "Test".to_string(),
                team_a: "England".to_string(),
                team_b: "Pakistan".to_string(),
                stats: None,
            },
        ];
        let speech = series_list_speech(&list);
        assert!(speech.starts_with(" 2 series going on in cricket. "));
        assert!(speech.contains("1). ODI matches between India and Australia. "));
        assert!(speech.contains("2). Test matches between England and Pakistan. "));
    }

    #[test]
    fn undecided_series_states_no_match_concluded() {
        let speech = series_detail_speech(&series(false));
        assert!(speech.contains("No match is yet concluded."));
        assert!(!speech.contains("has won"));
    }

    #[test]
    fn decided_series_states_win_counts() {
        let speech = series_detail_speech(&series(true));
        assert!(speech.contains("3 matches have been played."));
        assert!(speech.contains("Where India has won 2."));
        assert!(speech.contains("And Australia has won 1 matches."));
    }

    #[test]
    fn team_speech_orders_ranking_then_captain_then_coach() {
        let team = TeamSummary {
            name: "India".to_string(),
            rankings: vec![RankingEntry {
                position: "2".to_string(),
                match_type: "ODI".to_string(),
            }],
            captains: vec![TeamPerson {
                first_name: "Virat".to_string(),
                last_name: "Kohli".to_string(),
                match_type: Some("ODI".to_string()),
            }],
            coach: TeamPerson {
                first_name: "Ravi".to_string(),
                last_name: "Shastri".to_string(),
                match_type: None,
            },
        };

        let speech = team_speech(&team);
        let ranking = speech.find("Team is at position number 2").unwrap();
        let captain = speech.find("Virat Kohli is captain").unwrap();
        let coach = speech.find("Ravi Shastri is coach for the team.").unwrap();
        assert!(ranking < captain && captain < coach);
    }
}
