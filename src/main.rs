use discord_release_notify::context::{self, AmbientContext, ContextSource};
use discord_release_notify::error::Result;
use discord_release_notify::{NotifyConfig, notify, utils};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        error!("{}", e);
        // Surface the failure to the hosting workflow as an annotation.
        utils::issue_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Config first, so a missing webhook id/token halts before any
    // context work or network activity.
    let config = NotifyConfig::from_env()?;

    let ambient = AmbientContext::from_env();
    let source = ContextSource::from_env();
    let record = context::resolve(source, &ambient)?;

    info!(
        "Notifying release {} of {}",
        record.tag_name, record.full_name
    );

    let payload = notify::build_payload(&config, &record);
    notify::send(&config, &payload).await
}
