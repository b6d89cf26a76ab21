//! Cricket Skill Core - dialogue engine and data access for the cricket
//! voice skill.
//!
//! This library provides:
//! - HTTP data client for the public cricket query endpoint
//! - Fact extraction over raw JSON payloads (series lists, head-to-head
//!   series stats, team ranking/captain/coach)
//! - The multi-turn dialogue state machine driving the conversation
//! - Reply rendering into the platform's speech/card output shape
//! - The `DataError` / `DialogueError` taxonomy
//!
//! The platform envelope adapter and process bootstrap live in the
//! `skill_gateway_rust` service crate.

pub mod clients;
pub mod dialogue;
pub mod error;
pub mod extract;
pub mod reply;
pub mod types;

pub use clients::{CricketApiClient, CricketDataSource};
pub use dialogue::{DialogueEngine, DialogueState, Session, SESSION_STATE_ATTRIBUTE};
pub use error::{DataError, DialogueError};
pub use reply::{render, Card, Reply, Speech, SpeechStyle};
pub use types::{Intent, SeriesStats, SeriesSummary, Slot, TeamSummary};
