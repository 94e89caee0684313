pub mod catalog;
pub mod character;
pub mod edges;
pub mod health;
pub mod hunter;
pub mod inventory;
pub mod parse;
pub mod progression;
pub mod roll;

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use herald_rules::DamageTrack;
use herald_service::{HeraldService, JsonFileStore, ServiceConfig, ServiceError};

/// Everything a command needs: the service, who is asking, and which
/// character they named.
pub struct Context {
    pub service: HeraldService,
    pub owner: String,
    pub character: Option<String>,
}

impl Context {
    pub fn open(data: &Path, owner: String, character: Option<String>) -> Result<Self, String> {
        let config = ServiceConfig::from_env().map_err(|e| e.to_string())?;
        tracing::debug!(data = %data.display(), owner, "opening character file");
        let store = Arc::new(JsonFileStore::new(data));
        Ok(Self {
            service: HeraldService::new(store, config),
            owner,
            character,
        })
    }

    /// The named character, if `--character` was given.
    pub fn name(&self) -> Option<&str> {
        self.character.as_deref()
    }
}

/// Turn a service error into the message printed after `error:`.
pub fn describe(e: ServiceError) -> String {
    if e.is_transient() {
        format!("{e} (another command is using this character)")
    } else {
        e.to_string()
    }
}

/// Render a damage track as boxes: `[x]` aggravated, `[/]` superficial, `[ ]` free.
pub fn track_boxes(track: &DamageTrack) -> String {
    let mut out = String::new();
    for _ in 0..track.aggravated() {
        out.push_str(&"[x]".red().to_string());
    }
    for _ in 0..track.superficial() {
        out.push_str(&"[/]".yellow().to_string());
    }
    for _ in 0..track.remaining() {
        out.push_str("[ ]");
    }
    out
}

/// Render a 0-N rating as filled and empty dots.
pub fn dots(rating: u8, max: u8) -> String {
    let filled = usize::from(rating.min(max));
    format!(
        "{}{}",
        "●".repeat(filled),
        "○".repeat(usize::from(max) - filled)
    )
}
