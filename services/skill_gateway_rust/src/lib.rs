//! Cricket skill gateway library: platform envelope types, the skill
//! event handler, and environment configuration. The binary in `main.rs`
//! wires these to a line-delimited stdin/stdout transport.

pub mod config;
pub mod envelope;
pub mod skill;
