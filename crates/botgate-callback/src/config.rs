//! TOML-backed bot configuration, loaded once at startup.

use serde::Deserialize;
use std::path::Path;

use crate::{CallbackError, Credential};

#[derive(Debug, Deserialize)]
pub struct BotConfig {
    pub bot: BotSection,
}

#[derive(Debug, Deserialize)]
pub struct BotSection {
    pub token: String,
    pub encoding_aes_key: String,
    /// Platform-assigned id embedded in every envelope. Leave unset to
    /// skip the receiver check (URL verification before the id exists).
    #[serde(default)]
    pub receiver_id: Option<String>,
}

impl BotConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CallbackError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CallbackError::Config(format!("read config: {e}")))?;
        toml::from_str(&contents).map_err(|e| CallbackError::Config(format!("parse config: {e}")))
    }

    /// Validate the secrets into an engine-ready [`Credential`].
    pub fn credential(&self) -> Result<Credential, CallbackError> {
        Credential::new(
            self.bot.token.clone(),
            &self.bot.encoding_aes_key,
            self.bot.receiver_id.clone(),
        )
    }
}
