//! Cricket Skill Gateway
//!
//! Platform adapter for the cricket voice skill.
//!
//! This service:
//! - Reads one JSON request envelope per line on stdin
//! - Drives one dialogue turn per envelope (fetching upstream cricket
//!   data when the turn requires it)
//! - Writes one JSON response envelope per line on stdout
//!
//! The dialogue state machine, data client and reply rendering live in
//! `cricket_core`.

use anyhow::Result;
use cricket_core::clients::CricketApiClient;
use dotenv::dotenv;
use log::{error, info};
use skill_gateway_rust::config::SkillConfig;
use skill_gateway_rust::envelope::RequestEnvelope;
use skill_gateway_rust::skill::{self, CricketSkill};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    info!("Starting Cricket Skill gateway...");

    let config = SkillConfig::from_env();
    let client = CricketApiClient::with_base_url(&config.api_base_url, config.http_timeout);
    let cricket = CricketSkill::new(client);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let envelope: RequestEnvelope = match serde_json::from_str(&line) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!("malformed request envelope: {}", e);
                continue;
            }
        };

        let response = skill::handle_envelope(&cricket, envelope).await;
        let mut out = serde_json::to_string(&response)?;
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
