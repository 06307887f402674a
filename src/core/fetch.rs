//! Runs a [`FetchTicket`] on the tokio runtime and reports the outcome back
//! to the owning context as an [`Action`].
//!
//! The task never touches list state. If the ticket's token fires before the
//! source returns, the task exits without sending anything.

use std::time::Instant;

use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::core::action::{Action, FetchTicket};

pub fn spawn_fetch<T: Send + 'static>(
    ticket: FetchTicket<T>,
    tx: UnboundedSender<Action<T>>,
) -> JoinHandle<()> {
    let FetchTicket {
        id,
        source,
        start_index,
        cancel,
    } = ticket;

    tokio::spawn(async move {
        let started = Instant::now();
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Fetch {:?} cancelled before completion", id);
                return;
            }
            outcome = source.fetch(start_index, &cancel) => outcome,
        };

        if cancel.is_cancelled() {
            debug!("Fetch {:?} superseded after completion", id);
            return;
        }

        let elapsed = started.elapsed();
        let action = match outcome {
            Ok(page) => {
                info!(
                    "Fetch {:?} start={} returned {} items in {:.1}ms",
                    id,
                    start_index,
                    page.items.len(),
                    elapsed.as_secs_f64() * 1000.0
                );
                Action::PageLoaded { ticket: id, page }
            }
            Err(error) => {
                info!(
                    "Fetch {:?} start={} failed after {:.1}ms",
                    id,
                    start_index,
                    elapsed.as_secs_f64() * 1000.0
                );
                Action::PageFailed { ticket: id, error }
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to report fetch {:?}: receiver dropped", id);
        }
    })
}
