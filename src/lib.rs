pub mod context;
pub mod error;
pub mod notify;
pub mod utils;

use crate::error::{NotifyError, Result};
use crate::utils::action_input;

/// Webhook configuration, read from the step's action inputs.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub webhook_id: String,
    pub webhook_token: String,
    pub mention_everyone: bool,
}

impl NotifyConfig {
    /// Reads and validates the configuration from the `webhook_id`,
    /// `webhook_token` and `mention_everyone` action inputs.
    pub fn from_env() -> Result<Self> {
        Self::from_inputs(action_input)
    }

    fn from_inputs(input: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self {
            webhook_id: input("webhook_id").unwrap_or_default(),
            webhook_token: input("webhook_token").unwrap_or_default(),
            mention_everyone: input("mention_everyone")
                .map(|v| v == "true")
                .unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns an error unless both webhook identifier and token are set.
    pub fn validate(&self) -> Result<()> {
        if self.webhook_id.is_empty() || self.webhook_token.is_empty() {
            return Err(NotifyError::Config(
                "webhook ID or TOKEN are not configured correctly. Verify the workflow configuration.".to_string(),
            ));
        }
        Ok(())
    }
}
