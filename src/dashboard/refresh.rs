use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::views::{ViewName, ViewNavigator};

/// Periodically refresh dashboard metrics while the dashboard is on screen.
///
/// There is no backend to pull from, so a refresh is only logged. Returns the
/// number of refreshes performed once `token` is cancelled.
pub fn spawn_refresh(
    navigator: Arc<Mutex<ViewNavigator>>,
    period: Duration,
    token: CancellationToken,
) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut refreshes = 0;

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => return refreshes,
                _ = interval.tick() => {}
            }
            if navigator.lock().await.is_active(ViewName::Dashboard) {
                refreshes += 1;
                debug!(refreshes, "Updating dashboard metrics");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_refreshes_only_on_dashboard() {
        let navigator = Arc::new(Mutex::new(ViewNavigator::new()));
        let token = CancellationToken::new();
        let handle = spawn_refresh(navigator.clone(), Duration::from_secs(30), token.clone());

        tokio::time::sleep(Duration::from_secs(65)).await;
        navigator.lock().await.activate_view(ViewName::Reports);
        tokio::time::sleep(Duration::from_secs(60)).await;

        token.cancel();
        assert_eq!(handle.await.unwrap(), 2);
    }
}
