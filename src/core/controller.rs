//! # Controller
//!
//! Owns a [`ScrollList`] and is the only thing that mutates it. Hosts call the
//! public contract methods from their own loop; fetches run on tokio tasks and
//! come back through a channel, and are applied only when the host calls
//! [`Controller::pump`] or [`Controller::process_next`]. Completions are thus
//! serialized with everything else the host does.
//!
//! ```text
//!  host loop ──set_source/reload/near_end/retry/select──▶ update()
//!      ▲                                                     │ Effect::Fetch
//!      │ pump()                                              ▼
//!  mpsc::UnboundedReceiver ◀──── PageLoaded/PageFailed ── spawn_fetch()
//! ```

use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::core::action::{Action, Effect, update};
use crate::core::fetch::spawn_fetch;
use crate::core::state::{LoadStatus, Row, ScrollList, StatusMarker};
use crate::source::PageSource;

/// Changes a host should react to, polled with [`Controller::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    SelectionChanged(Option<usize>),
    StatusChanged(LoadStatus),
}

pub struct Controller<T> {
    list: ScrollList<T>,
    tx: UnboundedSender<Action<T>>,
    rx: UnboundedReceiver<Action<T>>,
    events: Vec<ListEvent>,
}

impl<T: Send + 'static> Default for Controller<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> Controller<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            list: ScrollList::new(),
            tx,
            rx,
            events: Vec::new(),
        }
    }

    pub fn set_source(&mut self, source: Arc<dyn PageSource<T>>) {
        self.dispatch(Action::SetSource(source));
    }

    pub fn reload(&mut self) {
        self.dispatch(Action::Reload);
    }

    pub fn notify_near_end(&mut self) {
        self.dispatch(Action::NearEnd);
    }

    pub fn retry_after_error(&mut self) {
        self.dispatch(Action::RetryAfterError);
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.dispatch(Action::Select(index));
    }

    /// Applies every completion that has already arrived. Never blocks.
    /// Returns how many were processed.
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
            processed += 1;
        }
        processed
    }

    /// Waits for the next completion and applies it.
    ///
    /// The controller holds its own sender, so the channel never closes: with
    /// no fetch outstanding this never returns. Wrap it in a timeout or check
    /// [`Controller::status`] for `Loading` first.
    pub async fn process_next(&mut self) {
        if let Some(action) = self.rx.recv().await {
            self.dispatch(action);
        }
    }

    pub fn drain_events(&mut self) -> Vec<ListEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn list(&self) -> &ScrollList<T> {
        &self.list
    }

    pub fn items(&self) -> &[T] {
        self.list.items()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_, T>> {
        self.list.rows()
    }

    pub fn status(&self) -> LoadStatus {
        self.list.status()
    }

    pub fn marker(&self) -> Option<&StatusMarker> {
        self.list.marker()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.list.selected_index()
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.list.selected_item()
    }

    fn dispatch(&mut self, action: Action<T>) {
        debug!("Controller received: {:?}", action);
        let before = self.list.status();
        let selected_before = self.list.selected_index();
        let effect = update(&mut self.list, action);
        let after = self.list.status();
        if before != after {
            self.events.push(ListEvent::StatusChanged(after));
        }
        // A reset clears the selection without an explicit Select.
        let cleared = selected_before.is_some() && self.list.selected_index().is_none();
        if cleared && !matches!(effect, Effect::SelectionChanged(_)) {
            self.events.push(ListEvent::SelectionChanged(None));
        }

        match effect {
            Effect::None => {}
            Effect::Fetch(ticket) => {
                // Detached; a superseded task notices its cancelled token and exits.
                spawn_fetch(ticket, self.tx.clone());
            }
            Effect::SelectionChanged(index) => {
                self.events.push(ListEvent::SelectionChanged(index));
            }
        }
    }
}
