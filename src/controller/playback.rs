//! Playback control methods

use crate::player::PollOutcome;

use super::AppController;

impl AppController {
    /// Play the track the current focus points at
    pub async fn play_selected(&self) {
        let selected = self.model.lock().await.selected_track().map(|song| song.id.clone());
        let Some(id) = selected else {
            tracing::debug!("Nothing selected to play");
            return;
        };

        if let Err(e) = self.session.play_by_id(&id).await {
            tracing::error!(error = %e, track_id = %id, "Play failed");
            self.model.lock().await.set_error(Self::format_error(&e));
        }
    }

    /// Fold the poller's latest outcome into the now-playing panel
    pub async fn apply_poll_outcome(&self, outcome: &PollOutcome) {
        if let PollOutcome::Failed { reachable, message } = outcome {
            tracing::debug!(reachable, error = %message, "Player status unavailable");
        }
        self.model.lock().await.update_playback(outcome);
    }
}
