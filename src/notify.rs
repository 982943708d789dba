//! Discord webhook delivery

use serde::Serialize;
use tracing::{info, warn};

use crate::NotifyConfig;
use crate::context::ReleaseRecord;
use crate::error::Result;

/// Accent color used for every release embed.
pub const EMBED_COLOR: u32 = 3_447_003;

const WEBHOOK_URL_BASE: &str = "https://discord.com/api/webhooks";

/// A single Discord message embed.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Embed {
    pub color: u32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
}

/// The webhook request body: an optional broadcast mention plus one embed.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WebhookPayload {
    pub content: String,
    pub embeds: Vec<Embed>,
}

/// Builds the outbound payload for a resolved release record.
pub fn build_payload(config: &NotifyConfig, record: &ReleaseRecord) -> WebhookPayload {
    let embed = Embed {
        color: EMBED_COLOR,
        title: format!("Update {}", record.tag_name),
        description: record.body.clone(),
        url: record.html_url.clone(),
    };

    WebhookPayload {
        content: if config.mention_everyone {
            "@everyone".to_string()
        } else {
            String::new()
        },
        embeds: vec![embed],
    }
}

/// Target URL with `wait=true` so Discord reports the delivery result
/// in the response instead of returning 204 immediately.
pub fn webhook_url(config: &NotifyConfig) -> String {
    format!(
        "{}/{}/{}?wait=true",
        WEBHOOK_URL_BASE, config.webhook_id, config.webhook_token
    )
}

/// Sends the payload. Exactly one POST per run, no retries.
///
/// The response body is informational only: it is logged as JSON when it
/// parses, and logged raw otherwise, but never escalated. Only a
/// transport-level failure marks the run failed.
pub async fn send(config: &NotifyConfig, payload: &WebhookPayload) -> Result<()> {
    // Halt before any network activity if the webhook is misconfigured.
    config.validate()?;

    let client = reqwest::Client::new();
    let response = client
        .post(webhook_url(config))
        .json(payload)
        .send()
        .await?;

    info!("Webhook responded with status {}", response.status());

    let text = response.text().await?;
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value) => info!("Webhook response: {}", value),
        Err(_) => warn!("Webhook returned a non-JSON response: {}", text),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotifyError;
    use serde_json::json;

    fn config(mention_everyone: bool) -> NotifyConfig {
        NotifyConfig {
            webhook_id: "123".to_string(),
            webhook_token: "abc".to_string(),
            mention_everyone,
        }
    }

    fn record() -> ReleaseRecord {
        ReleaseRecord {
            body: Some("Short note".to_string()),
            tag_name: "v1.2.0".to_string(),
            html_url: "https://example.com/r/v1.2.0".to_string(),
            full_name: "org/repo".to_string(),
        }
    }

    #[test]
    fn payload_carries_one_embed_with_release_fields() {
        let payload = build_payload(&config(false), &record());
        assert_eq!(payload.content, "");
        assert_eq!(payload.embeds.len(), 1);
        let embed = &payload.embeds[0];
        assert_eq!(embed.color, 3_447_003);
        assert_eq!(embed.title, "Update v1.2.0");
        assert_eq!(embed.description, Some("Short note".to_string()));
        assert_eq!(embed.url, "https://example.com/r/v1.2.0");
    }

    #[test]
    fn mention_everyone_sets_broadcast_content() {
        let payload = build_payload(&config(true), &record());
        assert_eq!(payload.content, "@everyone");
    }

    #[test]
    fn payload_serializes_to_wire_shape() {
        let payload = build_payload(&config(false), &record());
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "content": "",
                "embeds": [{
                    "color": 3_447_003,
                    "title": "Update v1.2.0",
                    "description": "Short note",
                    "url": "https://example.com/r/v1.2.0"
                }]
            })
        );
    }

    #[test]
    fn absent_body_is_omitted_from_serialized_embed() {
        let mut rec = record();
        rec.body = None;
        let payload = build_payload(&config(false), &rec);
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value["embeds"][0].get("description").is_none());
    }

    #[test]
    fn webhook_url_interpolates_id_and_token() {
        assert_eq!(
            webhook_url(&config(false)),
            "https://discord.com/api/webhooks/123/abc?wait=true"
        );
    }

    #[tokio::test]
    async fn send_with_missing_webhook_id_fails_before_any_request() {
        let config = NotifyConfig {
            webhook_id: String::new(),
            webhook_token: "abc".to_string(),
            mention_everyone: false,
        };
        let payload = build_payload(&config, &record());
        let err = send(&config, &payload).await.unwrap_err();
        assert!(matches!(err, NotifyError::Config(_)));
    }
}
