//! Skill turn integration tests.
//!
//! Drive full platform envelopes through the skill handler with canned
//! upstream payloads: launch, the multi-turn dialogue ladder, built-in
//! intents and corrupted session state.

use async_trait::async_trait;
use cricket_core::clients::CricketDataSource;
use cricket_core::error::DataError;
use serde_json::{json, Value};
use skill_gateway_rust::envelope::RequestEnvelope;
use skill_gateway_rust::skill::{handle_envelope, CricketSkill};

/// Canned payloads standing in for the live endpoint.
struct FakeSource {
    series: Option<Value>,
    team: Option<Value>,
}

#[async_trait]
impl CricketDataSource for FakeSource {
    async fn ongoing_series(&self) -> Result<Value, DataError> {
        self.series
            .clone()
            .ok_or_else(|| DataError::Transport("connection refused".to_string()))
    }

    async fn team(&self, _name: &str) -> Result<Value, DataError> {
        self.team
            .clone()
            .ok_or_else(|| DataError::Transport("connection refused".to_string()))
    }
}

fn skill_with(series: Option<Value>, team: Option<Value>) -> CricketSkill<FakeSource> {
    CricketSkill::new(FakeSource { series, team })
}

fn series_payload() -> Value {
    json!({
        "query": {
            "count": 1,
            "results": {
                "Series": [{
                    "Participant": {
                        "mtype": "ODI",
                        "Team": [
                            {"teamid": "t1", "Name": "India"},
                            {"teamid": "t2", "Name": "Australia"}
                        ]
                    },
                    "Schedule": {"Match": [{"status": "pre"}]}
                }]
            }
        }
    })
}

fn team_payload() -> Value {
    json!({
        "query": {
            "count": 1,
            "results": {
                "Team": {
                    "Ranking": [{"content": "2", "mtype": "ODI"}],
                    "Captain": [
                        {"FirstName": "Virat", "LastName": "Kohli", "mtype": "ODI"}
                    ],
                    "Coach": {"FirstName": "Ravi", "LastName": "Shastri"}
                }
            }
        }
    })
}

fn envelope(session_new: bool, level: Option<&str>, request: Value) -> RequestEnvelope {
    let mut session = json!({"new": session_new, "sessionId": "session-1"});
    if let Some(level) = level {
        session["attributes"] = json!({ "level": level });
    }
    serde_json::from_value(json!({
        "version": "1.0",
        "session": session,
        "request": request
    }))
    .unwrap()
}

fn intent_request(name: &str, slots: Value) -> Value {
    json!({
        "type": "IntentRequest",
        "requestId": "request-1",
        "intent": {"name": name, "slots": slots}
    })
}

#[tokio::test]
async fn launch_turn_is_non_terminal_with_reprompt_and_default_state() {
    let skill = skill_with(None, None);
    let request = envelope(
        true,
        None,
        json!({"type": "LaunchRequest", "requestId": "request-1"}),
    );

    let response = serde_json::to_value(handle_envelope(&skill, request).await).unwrap();

    assert_eq!(response["response"]["shouldEndSession"], json!(false));
    assert_eq!(response["response"]["outputSpeech"]["type"], json!("SSML"));
    assert!(response["response"]["reprompt"]["outputSpeech"]["text"]
        .as_str()
        .unwrap()
        .contains("Cricket Skill"));
    assert_eq!(
        response["sessionAttributes"]["level"],
        json!("ONGOING_SERIES_SUMMARY")
    );
}

#[tokio::test]
async fn first_continue_turn_lists_series_and_advances_state() {
    let skill = skill_with(Some(series_payload()), None);
    let request = envelope(true, None, intent_request("CricketIntent", json!({})));

    let response = serde_json::to_value(handle_envelope(&skill, request).await).unwrap();

    assert_eq!(response["response"]["shouldEndSession"], json!(false));
    assert_eq!(
        response["sessionAttributes"]["level"],
        json!("SPECIFIC_SERIES_SUMMARY")
    );
    let ssml = response["response"]["outputSpeech"]["ssml"].as_str().unwrap();
    assert!(ssml.starts_with("<speak>"));
    assert!(ssml.contains("1 series going on in cricket."));
    assert_eq!(response["response"]["card"]["type"], json!("Simple"));
    assert_eq!(response["response"]["card"]["title"], json!("Cricket"));
}

#[tokio::test]
async fn team_turn_ends_the_conversation_with_ordered_facts() {
    let skill = skill_with(None, Some(team_payload()));
    let request = envelope(
        false,
        Some("SPECIFIC_TEAM_SUMMARY"),
        intent_request(
            "CricketIntent",
            json!({"TeamName": {"name": "TeamName", "value": "India"}}),
        ),
    );

    let response = serde_json::to_value(handle_envelope(&skill, request).await).unwrap();

    assert_eq!(response["response"]["shouldEndSession"], json!(true));
    let text = response["response"]["outputSpeech"]["text"].as_str().unwrap();
    assert_eq!(text.matches('.').count(), 3);
    let ranking = text.find("Team is at position number 2").unwrap();
    let captain = text.find("Virat Kohli is captain").unwrap();
    let coach = text.find("Ravi Shastri is coach for the team.").unwrap();
    assert!(ranking < captain && captain < coach);
}

#[tokio::test]
async fn fetch_failure_collapses_to_fixed_terminal_reply() {
    let skill = skill_with(None, None);
    let request = envelope(true, None, intent_request("CricketIntent", json!({})));

    let response = serde_json::to_value(handle_envelope(&skill, request).await).unwrap();

    assert_eq!(response["response"]["shouldEndSession"], json!(true));
    assert_eq!(
        response["response"]["outputSpeech"]["text"],
        json!("There is a problem in getting data. Please try again later. Thanks!")
    );
}

#[tokio::test]
async fn corrupted_state_yields_unknown_level_reply() {
    let skill = skill_with(Some(series_payload()), None);
    let request = envelope(
        false,
        Some("LEVEL_9"),
        intent_request("CricketIntent", json!({})),
    );

    let response = serde_json::to_value(handle_envelope(&skill, request).await).unwrap();

    assert_eq!(response["response"]["shouldEndSession"], json!(true));
    assert_eq!(
        response["response"]["outputSpeech"]["text"],
        json!("unknown level LEVEL_9")
    );
}

#[tokio::test]
async fn help_intent_is_non_terminal_with_its_own_reprompt() {
    let skill = skill_with(None, None);
    let request = envelope(false, None, intent_request("AMAZON.HelpIntent", json!({})));

    let response = serde_json::to_value(handle_envelope(&skill, request).await).unwrap();

    assert_eq!(response["response"]["shouldEndSession"], json!(false));
    assert_eq!(
        response["response"]["reprompt"]["outputSpeech"]["text"],
        json!("What do you want?")
    );
}

#[tokio::test]
async fn stop_and_cancel_intents_say_goodbye() {
    for name in ["AMAZON.StopIntent", "AMAZON.CancelIntent"] {
        let skill = skill_with(None, None);
        let request = envelope(false, None, intent_request(name, json!({})));

        let response = serde_json::to_value(handle_envelope(&skill, request).await).unwrap();

        assert_eq!(response["response"]["shouldEndSession"], json!(true));
        assert_eq!(response["response"]["outputSpeech"]["text"], json!("Goodbye"));
    }
}

#[tokio::test]
async fn one_shot_team_info_replies_terminally_with_card() {
    let skill = skill_with(None, Some(team_payload()));
    let request = envelope(
        true,
        None,
        intent_request(
            "TeamInfoIntent",
            json!({"TeamName": {"name": "TeamName", "value": "India"}}),
        ),
    );

    let response = serde_json::to_value(handle_envelope(&skill, request).await).unwrap();

    assert_eq!(response["response"]["shouldEndSession"], json!(true));
    assert_eq!(response["response"]["card"]["title"], json!("Cricket"));
    assert!(response["response"]["outputSpeech"]["text"]
        .as_str()
        .unwrap()
        .contains("is coach for the team."));
}

#[tokio::test]
async fn session_ended_request_gets_a_content_free_acknowledgement() {
    let skill = skill_with(None, None);
    let request = envelope(
        false,
        Some("SPECIFIC_SERIES_SUMMARY"),
        json!({"type": "SessionEndedRequest", "requestId": "request-1", "reason": "USER_INITIATED"}),
    );

    let response = serde_json::to_value(handle_envelope(&skill, request).await).unwrap();

    assert_eq!(response["response"]["shouldEndSession"], json!(true));
    assert!(response["response"].get("outputSpeech").is_none());
}

#[tokio::test]
async fn unsupported_intent_never_panics() {
    let skill = skill_with(None, None);
    let request = envelope(false, None, intent_request("WeatherIntent", json!({})));

    let response = serde_json::to_value(handle_envelope(&skill, request).await).unwrap();

    assert_eq!(response["response"]["shouldEndSession"], json!(true));
    assert!(response["response"]["outputSpeech"]["text"]
        .as_str()
        .unwrap()
        .starts_with("Sorry"));
}
