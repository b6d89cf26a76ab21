//! The cricket skill event handler.
//!
//! `SkillHandler` is the capability set the platform drives: session
//! lifecycle callbacks plus a named intent dispatch table. `CricketSkill`
//! implements it over the dialogue engine; `handle_envelope` adapts one
//! platform envelope to one handler invocation.

use crate::envelope::{RequestBody, RequestEnvelope, ResponseEnvelope};
use async_trait::async_trait;
use cricket_core::clients::CricketDataSource;
use cricket_core::dialogue::{DialogueEngine, Session};
use cricket_core::reply::{render, Card, Reply, SpeechStyle, CARD_TITLE, SKILL_REPROMPT};
use cricket_core::types::Intent;
use log::{error, info};

/// Welcome speech on launch, marked up for spoken emphasis.
const WELCOME_SPEECH: &str = "<p>Cricket.</p> <p>Do you want to get update?</p>";

/// Card mirror of the welcome speech, markup stripped.
const WELCOME_CARD: &str = "Cricket. Do you want to get update?";

const HELP_SPEECH: &str = "With Cricket Skill, you can get up to date news of what is \
     happening in Cricket sport world. For interaction, you could say give me update, \
     or you can say exit.";

const HELP_REPROMPT: &str = "What do you want?";

const GOODBYE_SPEECH: &str = "Goodbye";

const UNSUPPORTED_SPEECH: &str = "Sorry, I do not understand that request.";

/// Intent names dispatched by the skill.
const INTENT_CONTINUE: &str = "CricketIntent";
const INTENT_SERIES_INFO: &str = "SeriesInfoIntent";
const INTENT_TEAM_INFO: &str = "TeamInfoIntent";
const INTENT_HELP: &str = "AMAZON.HelpIntent";
const INTENT_STOP: &str = "AMAZON.StopIntent";
const INTENT_CANCEL: &str = "AMAZON.CancelIntent";

/// Event handler capability set expected by the platform adapter.
#[async_trait]
pub trait SkillHandler: Send + Sync {
    fn on_session_started(&self, session_id: &str, session: &mut Session);

    fn on_session_ended(&self, session_id: &str);

    async fn on_launch(&self, session: &mut Session) -> Reply;

    async fn on_intent(&self, intent: &Intent, session: &mut Session) -> Reply;
}

/// The cricket skill: dialogue engine plus fixed built-in replies.
pub struct CricketSkill<S> {
    engine: DialogueEngine<S>,
}

impl<S: CricketDataSource> CricketSkill<S> {
    pub fn new(source: S) -> Self {
        Self {
            engine: DialogueEngine::new(source),
        }
    }
}

#[async_trait]
impl<S: CricketDataSource> SkillHandler for CricketSkill<S> {
    fn on_session_started(&self, session_id: &str, session: &mut Session) {
        info!("session started: {}", session_id);
        *session = Session::new();
    }

    fn on_session_ended(&self, session_id: &str) {
        info!("session ended: {}", session_id);
    }

    async fn on_launch(&self, _session: &mut Session) -> Reply {
        // Session state is left untouched; the first continue intent
        // starts from wherever the conversation stands.
        render(
            WELCOME_SPEECH,
            SpeechStyle::Markup,
            Some(SKILL_REPROMPT),
            Some(Card {
                title: CARD_TITLE.to_string(),
                content: WELCOME_CARD.to_string(),
            }),
        )
    }

    async fn on_intent(&self, intent: &Intent, session: &mut Session) -> Reply {
        match intent.name.as_str() {
            INTENT_CONTINUE => self.engine.continue_turn(session, intent).await,
            INTENT_SERIES_INFO => self.engine.series_info(intent).await,
            INTENT_TEAM_INFO => self.engine.team_info(intent).await,
            INTENT_HELP => render(HELP_SPEECH, SpeechStyle::Plain, Some(HELP_REPROMPT), None),
            INTENT_STOP | INTENT_CANCEL => Reply::tell(GOODBYE_SPEECH),
            other => {
                error!("unsupported intent: {}", other);
                Reply::tell(UNSUPPORTED_SPEECH)
            }
        }
    }
}

/// Adapt one platform envelope to one handler invocation. Every path,
/// including corrupted session state, terminates in a well-formed
/// response envelope.
pub async fn handle_envelope<H: SkillHandler>(
    handler: &H,
    envelope: RequestEnvelope,
) -> ResponseEnvelope {
    let mut session = match Session::from_attribute(envelope.session.state_attribute()) {
        Ok(session) => session,
        Err(e) => {
            error!(
                "corrupted session state for {}: {}",
                envelope.session.session_id, e
            );
            return ResponseEnvelope::terminal(Reply::tell(e.to_string()));
        }
    };

    if envelope.session.new {
        handler.on_session_started(&envelope.session.session_id, &mut session);
    }

    let reply = match envelope.request {
        RequestBody::LaunchRequest { .. } => handler.on_launch(&mut session).await,
        RequestBody::IntentRequest { intent, .. } => {
            handler.on_intent(&intent, &mut session).await
        }
        RequestBody::SessionEndedRequest { .. } => {
            handler.on_session_ended(&envelope.session.session_id);
            return ResponseEnvelope::empty();
        }
    };

    ResponseEnvelope::from_reply(reply, &session)
}
