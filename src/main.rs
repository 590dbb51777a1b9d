use anyhow::{Context, Result};
use chrono::Utc;
use course_watch::{
    fetch::{build_client, Registrar},
    init_tracing,
    notify::ResendNotifier,
    pipeline::{self, Outcome},
    schedule::Schedule,
    Config,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    init_tracing();
    info!("startup");

    // ─── 2) config + shared collaborators ────────────────────────────
    let config = Config::from_env().context("loading configuration")?;
    let client = build_client(&config)?;
    let registrar = Arc::new(Registrar::new(client.clone(), &config));
    let notifier = Arc::new(ResendNotifier::new(client, config.email.clone()));
    let crn: Arc<str> = Arc::from(config.target_crn.as_str());

    let schedule = Schedule::default_windows()?;
    for w in schedule.windows() {
        info!(window = w.as_str(), "polling window");
    }
    info!(crn = %crn, term = %config.term, dept = %config.dept, "watching section");

    // ─── 3) tick loop ────────────────────────────────────────────────
    let mut last_tick = None;
    loop {
        let now = Utc::now();
        let Some(next) = schedule.next_tick(now, last_tick) else {
            warn!("no upcoming tick; exiting");
            return Ok(());
        };
        let wait = (next - now).to_std().unwrap_or_default();
        info!(next = %next, wait_secs = wait.as_secs(), "sleeping until next tick");

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted; exiting");
                return Ok(());
            }
        }

        last_tick = Some(next);

        // each tick runs on its own; a failure only ends that run
        let registrar = Arc::clone(&registrar);
        let notifier = Arc::clone(&notifier);
        let crn = Arc::clone(&crn);
        tokio::spawn(async move {
            match pipeline::run(registrar.as_ref(), notifier.as_ref(), &crn).await {
                Ok(Outcome::Notified(_)) => info!(tick = %next, "notified"),
                Ok(Outcome::Full(_)) => info!(tick = %next, "still full"),
                Ok(Outcome::NotFound) => warn!(tick = %next, "section not listed"),
                Err(e) => error!(tick = %next, error = %e, "run failed"),
            }
        });
    }
}
