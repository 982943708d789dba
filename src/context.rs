//! Release event context resolution
//!
//! Produces one normalized [`ReleaseRecord`] per run, from whichever of
//! two sources is available: an injected `GITHUB_CONTEXT` JSON payload,
//! or the ambient event context the Actions runner provides.

use serde::Deserialize;
use tracing::warn;

use crate::error::{NotifyError, Result};

/// Maximum number of characters of the release body forwarded to the webhook.
const MAX_BODY_CHARS: usize = 1500;

/// Injected release JSON; when set and non-empty it wins over the ambient context.
pub const ENV_RELEASE_CONTEXT: &str = "GITHUB_CONTEXT";
/// Repository full name override in `owner/repo` form.
pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
/// Path to the event payload file written by the runner.
pub const ENV_EVENT_PATH: &str = "GITHUB_EVENT_PATH";

/// The release object as it appears in a GitHub release event.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseEvent {
    pub body: Option<String>,
    pub tag_name: String,
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    release: Option<ReleaseEvent>,
    repository: Option<RepositoryInfo>,
}

#[derive(Debug, Deserialize)]
struct RepositoryInfo {
    full_name: String,
}

/// Event context materialized from the hosting runner. Read once at
/// startup; resolution itself performs no I/O.
#[derive(Debug, Clone, Default)]
pub struct AmbientContext {
    pub release: Option<ReleaseEvent>,
    pub repo_full_name: Option<String>,
}

impl AmbientContext {
    /// Materializes the ambient context: the event payload file named by
    /// `GITHUB_EVENT_PATH` plus the repository name. An unreadable or
    /// unparsable payload is tolerated and logged, leaving the fields empty.
    pub fn from_env() -> Self {
        Self::load(
            std::env::var(ENV_EVENT_PATH).ok(),
            std::env::var(ENV_REPOSITORY).ok(),
        )
    }

    fn load(event_path: Option<String>, repo_env: Option<String>) -> Self {
        let payload = event_path
            .and_then(|path| match std::fs::read_to_string(&path) {
                Ok(contents) => Some(contents),
                Err(e) => {
                    warn!("Could not read event payload at '{}': {}", path, e);
                    None
                }
            })
            .and_then(|contents| match serde_json::from_str::<EventPayload>(&contents) {
                Ok(payload) => Some(payload),
                Err(e) => {
                    warn!("Could not parse event payload: {}", e);
                    None
                }
            });

        let repo_full_name = payload
            .as_ref()
            .and_then(|p| p.repository.as_ref())
            .map(|repo| repo.full_name.clone())
            .or_else(|| repo_env.filter(|v| !v.is_empty()));

        Self {
            release: payload.and_then(|p| p.release),
            repo_full_name,
        }
    }
}

/// Where the release record comes from, decided once at entry.
#[derive(Debug, Clone)]
pub enum ContextSource {
    /// `GITHUB_CONTEXT` was set: its JSON is used exclusively for the
    /// release fields, with an optional repository name override.
    Explicit {
        raw: String,
        repo_override: Option<String>,
    },
    /// Fall back to the runner-provided event context.
    Ambient,
}

impl ContextSource {
    pub fn from_env() -> Self {
        Self::select(
            std::env::var(ENV_RELEASE_CONTEXT).ok(),
            std::env::var(ENV_REPOSITORY).ok(),
        )
    }

    /// An empty `GITHUB_CONTEXT` counts the same as unset: ambient wins.
    fn select(raw: Option<String>, repo_env: Option<String>) -> Self {
        match raw {
            Some(raw) if !raw.is_empty() => ContextSource::Explicit {
                raw,
                repo_override: repo_env.filter(|v| !v.is_empty()),
            },
            _ => ContextSource::Ambient,
        }
    }
}

/// Normalized release description consumed by the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRecord {
    pub body: Option<String>,
    pub tag_name: String,
    pub html_url: String,
    pub full_name: String,
}

/// Resolves exactly one [`ReleaseRecord`] from the chosen source.
///
/// Malformed explicit JSON is fatal; there is no partial fallback to the
/// ambient context. The ambient branch requires a release payload.
pub fn resolve(source: ContextSource, ambient: &AmbientContext) -> Result<ReleaseRecord> {
    match source {
        ContextSource::Explicit { raw, repo_override } => {
            let release: ReleaseEvent = serde_json::from_str(&raw)?;
            let full_name = match repo_override {
                Some(name) => name,
                None => ambient_full_name(ambient)?,
            };
            Ok(normalize(release, full_name))
        }
        ContextSource::Ambient => {
            let release = ambient.release.clone().ok_or_else(|| {
                NotifyError::Context("event payload carries no release".to_string())
            })?;
            let full_name = ambient_full_name(ambient)?;
            Ok(normalize(release, full_name))
        }
    }
}

fn ambient_full_name(ambient: &AmbientContext) -> Result<String> {
    ambient.repo_full_name.clone().ok_or_else(|| {
        NotifyError::Context("repository full name is not available".to_string())
    })
}

fn normalize(release: ReleaseEvent, full_name: String) -> ReleaseRecord {
    ReleaseRecord {
        body: truncate_body(release.body, &release.html_url),
        tag_name: release.tag_name,
        html_url: release.html_url,
        full_name,
    }
}

/// Caps the release body at [`MAX_BODY_CHARS`] characters. A truncated
/// body gets a Markdown link back to the full release notes appended.
/// An absent body stays absent.
fn truncate_body(body: Option<String>, html_url: &str) -> Option<String> {
    let body = body?;
    if body.chars().count() < MAX_BODY_CHARS {
        return Some(body);
    }
    let truncated: String = body.chars().take(MAX_BODY_CHARS).collect();
    Some(format!("{} ([...]({}))", truncated, html_url))
}
