//! Forced realignment of every track to the reference track.

use tracing::info;

use super::controller::Transport;
use super::seek::SeekOutcome;
use super::track::PresentationSink;
use super::types::Notice;

impl<S: PresentationSink> Transport<S> {
    /// Snap every track to wherever the reference track currently is.
    ///
    /// `Synced` is only reported when every track followed; a partial sync
    /// leaves the seek's `SeekIncomplete` notice as the only report.
    /// Returns `None` when no track is registered.
    pub fn force_sync(&mut self) -> Option<SeekOutcome> {
        let position = self.registry.reference()?.handle.position();
        let outcome = self.seek_to(position);
        if outcome.is_complete() {
            info!(position = outcome.position, "tracks synced to reference");
            self.sink.on_notice(Notice::Synced {
                position: outcome.position,
            });
        }
        Some(outcome)
    }
}
