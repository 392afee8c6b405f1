use tracing::instrument;
use uppye_core::tokens::SessionStore;

use crate::app_state::SharedAppState;

pub async fn setup_expiry_sweeper(
    app_state: SharedAppState,
) -> anyhow::Result<tokio::task::JoinHandle<anyhow::Result<()>>> {
    // Sweep once at startup so stale rows never outlive a restart.
    sweep_expired_sessions(app_state.clone()).await;

    let stop_flag = app_state.clone().stop_flag.clone();
    let mut scheduler = clokwerk::AsyncScheduler::new();

    {
        let app_state = app_state.clone();
        scheduler
            .every(app_state.settings.auth.cleanup_interval.into())
            .run(move || {
                let app_state = app_state.clone();
                async move {
                    sweep_expired_sessions(app_state).await;
                }
            });
    }

    // Handle the scheduler in a separate task.
    let handle = tokio::spawn({
        let stop_flag = stop_flag.clone();
        async move {
            while !stop_flag.is_stopped() {
                scheduler.run_pending().await;
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }

            Ok(())
        }
    });

    Ok(handle)
}

#[instrument(skip(app_state))]
pub async fn sweep_expired_sessions(app_state: SharedAppState) {
    match app_state
        .sessions
        .delete_expired_before(chrono::Utc::now())
        .await
    {
        Ok(removed) if removed > 0 => {
            tracing::info!("Swept {} expired refresh sessions", removed);
        }
        Ok(_) => {
            tracing::debug!("No expired refresh sessions to sweep");
        }
        Err(e) => {
            tracing::error!("Error while sweeping expired sessions: {:?}", e);
        }
    }
}
