use anyhow::{Context, Result};
use course_watch::{
    fetch::{build_client, Registrar},
    init_tracing,
    notify::ResendNotifier,
    pipeline::{self, Outcome},
    Config,
};
use tracing::info;

/// Run the check once, right now, and exit.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env().context("loading configuration")?;
    let client = build_client(&config)?;
    let registrar = Registrar::new(client.clone(), &config);
    let notifier = ResendNotifier::new(client, config.email.clone());

    let outcome = pipeline::run(&registrar, &notifier, &config.target_crn)
        .await
        .with_context(|| format!("checking CRN {}", config.target_crn))?;

    match outcome {
        Outcome::Notified(record) => info!(?record, "seat open, email sent"),
        Outcome::Full(record) => info!(?record, "class is full"),
        Outcome::NotFound => info!(crn = %config.target_crn, "no class found with this CRN"),
    }
    Ok(())
}
