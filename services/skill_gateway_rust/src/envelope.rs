//! Platform request/response envelope types.
//!
//! The voice platform delivers one JSON envelope per turn and expects one
//! back. These types cover only what the skill consumes: the session
//! record with its attribute map, the three request kinds, and the
//! speech/card/reprompt response shape.

use cricket_core::dialogue::{Session, SESSION_STATE_ATTRIBUTE};
use cricket_core::reply::{Card, Reply, Speech};
use cricket_core::types::Intent;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One inbound turn from the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: String,
    pub session: EnvelopeSession,
    pub request: RequestBody,
}

/// The platform-managed session record delivered with every turn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSession {
    #[serde(default)]
    pub new: bool,
    pub session_id: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl EnvelopeSession {
    /// The stored dialogue-state attribute, if any.
    pub fn state_attribute(&self) -> Option<&Value> {
        self.attributes.get(SESSION_STATE_ATTRIBUTE)
    }
}

/// The request kinds the skill consumes.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum RequestBody {
    #[serde(rename_all = "camelCase")]
    LaunchRequest { request_id: String },
    #[serde(rename_all = "camelCase")]
    IntentRequest { request_id: String, intent: Intent },
    #[serde(rename_all = "camelCase")]
    SessionEndedRequest {
        request_id: String,
        #[serde(default)]
        reason: Option<String>,
    },
}

/// One outbound turn to the platform.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session_attributes: Map<String, Value>,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPayload {
    #[serde(rename = "type")]
    pub card_type: String,
    pub title: String,
    pub content: String,
}

impl ResponseEnvelope {
    /// Wrap a computed reply, carrying the session state back to the
    /// platform for the next turn.
    pub fn from_reply(reply: Reply, session: &Session) -> Self {
        let mut attributes = Map::new();
        attributes.insert(
            SESSION_STATE_ATTRIBUTE.to_string(),
            session.attribute_value(),
        );

        Self {
            version: "1.0".to_string(),
            session_attributes: attributes,
            response: ResponseBody {
                output_speech: Some(output_speech(&reply.speech)),
                card: reply.card.map(card_payload),
                reprompt: reply.reprompt.map(|text| Reprompt {
                    output_speech: OutputSpeech::PlainText { text },
                }),
                should_end_session: reply.end_session,
            },
        }
    }

    /// A terminal reply outside any usable session (corrupted state).
    pub fn terminal(reply: Reply) -> Self {
        Self {
            version: "1.0".to_string(),
            session_attributes: Map::new(),
            response: ResponseBody {
                output_speech: Some(output_speech(&reply.speech)),
                card: reply.card.map(card_payload),
                reprompt: None,
                should_end_session: true,
            },
        }
    }

    /// The content-free acknowledgement for session-end events.
    pub fn empty() -> Self {
        Self {
            version: "1.0".to_string(),
            session_attributes: Map::new(),
            response: ResponseBody {
                output_speech: None,
                card: None,
                reprompt: None,
                should_end_session: true,
            },
        }
    }
}

fn output_speech(speech: &Speech) -> OutputSpeech {
    match speech {
        Speech::Plain(text) => OutputSpeech::PlainText { text: text.clone() },
        Speech::Ssml(ssml) => OutputSpeech::Ssml { ssml: ssml.clone() },
    }
}

fn card_payload(card: Card) -> CardPayload {
    CardPayload {
        card_type: "Simple".to_string(),
        title: card.title,
        content: card.content,
    }
}
