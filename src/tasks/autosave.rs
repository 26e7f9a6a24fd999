use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::services::editor_session::EditorSession;

/// Periodic draft autosave for a shared editing session. Ticks snapshot the
/// whole draft; errors are handled inside `autosave_tick` and never stop the
/// loop. The loop ends when the shutdown channel flips or its sender drops.
pub async fn run(
    session: Arc<Mutex<EditorSession>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first interval tick fires immediately; skip it so a fresh session
    // is not snapshotted before the user touched anything.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                session.lock().await.autosave_tick().await;
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    tracing::debug!("Autosave loop stopped");
}

/// Spawns the autosave loop and hands back the shutdown sender with the join
/// handle so the embedder can stop it when the editor closes.
pub fn spawn(
    session: Arc<Mutex<EditorSession>>,
    period: Duration,
) -> (watch::Sender<bool>, JoinHandle<()>) {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(run(session, period, shutdown_rx));
    (shutdown_tx, handle)
}
