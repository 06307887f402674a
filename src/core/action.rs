//! # Actions
//!
//! Everything that can happen to the list becomes an `Action`.
//! Host reports the scroll position is near the end? That's `Action::NearEnd`.
//! A fetch finishes? That's `Action::PageLoaded { ticket, page }`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! telling the caller what to do next. No I/O here: a fetch is requested by
//! returning `Effect::Fetch(ticket)`, and the caller decides how to run it.
//!
//! ```text
//! State + Action  →  update()  →  Effect
//! ```
//!
//! Stale completions are filtered here. A ticket only applies if both its
//! generation and its source epoch still match the state.

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::core::state::{LoadStatus, ScrollList};
use crate::source::{FetchError, Page, PageSource};

/// Identifies the fetch a completion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketId {
    pub generation: u64,
    pub source_epoch: u64,
}

/// Everything a worker needs to run one fetch.
pub struct FetchTicket<T> {
    pub id: TicketId,
    pub source: Arc<dyn PageSource<T>>,
    pub start_index: usize,
    pub cancel: CancellationToken,
}

pub enum Action<T> {
    /// Swap the page source and reload from the start.
    SetSource(Arc<dyn PageSource<T>>),
    /// Clear and refetch from the current source.
    Reload,
    /// The host's viewport is close to the last row.
    NearEnd,
    /// The user asked to retry after a failed fetch.
    RetryAfterError,
    /// The host's selection moved. `None` clears it.
    Select(Option<usize>),
    PageLoaded { ticket: TicketId, page: Page<T> },
    PageFailed { ticket: TicketId, error: FetchError },
}

impl<T> fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SetSource(source) => write!(f, "SetSource({:?})", source.label()),
            Action::Reload => f.write_str("Reload"),
            Action::NearEnd => f.write_str("NearEnd"),
            Action::RetryAfterError => f.write_str("RetryAfterError"),
            Action::Select(index) => write!(f, "Select({index:?})"),
            Action::PageLoaded { ticket, page } => write!(
                f,
                "PageLoaded {{ ticket: {ticket:?}, items: {}, has_more: {}, next_start: {} }}",
                page.items.len(),
                page.has_more,
                page.next_start
            ),
            Action::PageFailed { ticket, error } => {
                write!(f, "PageFailed {{ ticket: {ticket:?}, error: {error} }}")
            }
        }
    }
}

/// What the caller should do after `update()`.
pub enum Effect<T> {
    None,
    /// Run this fetch off the owning context and feed the result back.
    Fetch(FetchTicket<T>),
    /// The selection changed; notify observers.
    SelectionChanged(Option<usize>),
}

#[cfg(test)]
impl<T> Effect<T> {
    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }
}

pub fn update<T>(list: &mut ScrollList<T>, action: Action<T>) -> Effect<T> {
    match action {
        Action::SetSource(source) => {
            list.source_epoch += 1;
            list.marker.loading_message = source.label().to_string();
            info!(
                "Source set: {:?} (epoch {})",
                source.label(),
                list.source_epoch
            );
            list.source = Some(source);
            reset(list)
        }
        Action::Reload => {
            if list.source.is_none() {
                debug!("Reload ignored: no source set");
                return Effect::None;
            }
            reset(list)
        }
        Action::NearEnd => {
            if list.marker.status != LoadStatus::Ready {
                return Effect::None;
            }
            begin_fetch(list)
        }
        Action::RetryAfterError => begin_fetch(list),
        Action::Select(index) => select(list, index),
        Action::PageLoaded { ticket, page } => {
            if !is_current(list, ticket) {
                debug!("Discarding superseded page for {:?}", ticket);
                return Effect::None;
            }
            apply_page(list, page)
        }
        Action::PageFailed { ticket, error } => {
            if !is_current(list, ticket) {
                debug!("Discarding superseded failure for {:?}: {}", ticket, error);
                return Effect::None;
            }
            warn!("Fetch failed at start={}: {}", list.next_start, error);
            list.marker.status = LoadStatus::ErrorOccurred;
            list.marker.error_message = Some(format!("An error occurred: {error}"));
            list.marker_visible = true;
            Effect::None
        }
    }
}

fn is_current<T>(list: &ScrollList<T>, ticket: TicketId) -> bool {
    !list.cancel.is_cancelled()
        && ticket.generation == list.generation
        && ticket.source_epoch == list.source_epoch
}

/// Clears the list, reseeds it with a Loading marker and fetches from zero.
fn reset<T>(list: &mut ScrollList<T>) -> Effect<T> {
    list.items.clear();
    list.selected = None;
    list.auto_select_armed = true;
    list.next_start = 0;
    list.marker_visible = true;
    begin_fetch(list)
}

/// Starts a new generation, cancelling whatever fetch was live.
fn begin_fetch<T>(list: &mut ScrollList<T>) -> Effect<T> {
    let Some(source) = list.source.clone() else {
        debug!("Fetch requested with no source set");
        return Effect::None;
    };

    list.cancel.cancel();
    list.cancel = CancellationToken::new();
    list.generation += 1;

    list.marker.status = LoadStatus::Loading;
    list.marker.error_message = None;
    list.marker_visible = true;

    debug!(
        "Dispatching fetch: generation={} start={}",
        list.generation, list.next_start
    );

    Effect::Fetch(FetchTicket {
        id: TicketId {
            generation: list.generation,
            source_epoch: list.source_epoch,
        },
        source,
        start_index: list.next_start,
        cancel: list.cancel.clone(),
    })
}

fn apply_page<T>(list: &mut ScrollList<T>, page: Page<T>) -> Effect<T> {
    let appended = page.items.len();
    list.marker_visible = false;
    list.items.extend(page.items);

    if !page.has_more {
        if list.items.is_empty() {
            list.marker.status = LoadStatus::NoItemsFound;
            list.marker_visible = true;
        } else {
            list.marker.status = LoadStatus::NoMoreItems;
        }
    } else {
        list.marker.status = LoadStatus::Ready;
        list.next_start = page.next_start;
        list.marker_visible = true;
    }

    info!(
        "Applied page: +{} items (total {}), status={}",
        appended,
        list.items.len(),
        list.marker.status
    );

    if list.auto_select_armed && list.selected.is_none() && !list.items.is_empty() {
        list.auto_select_armed = false;
        list.selected = Some(0);
        return Effect::SelectionChanged(Some(0));
    }
    Effect::None
}

fn select<T>(list: &mut ScrollList<T>, index: Option<usize>) -> Effect<T> {
    match index {
        Some(i) if i < list.items.len() => {
            list.auto_select_armed = false;
            if list.selected == Some(i) {
                return Effect::None;
            }
            list.selected = Some(i);
            Effect::SelectionChanged(Some(i))
        }
        // The marker row is not selectable; keep whatever was selected.
        Some(i) if list.marker_visible && i == list.items.len() => Effect::None,
        Some(i) => {
            debug!("Select({}) out of range ({} rows)", i, list.row_count());
            Effect::None
        }
        None => {
            list.auto_select_armed = false;
            if list.selected.take().is_some() {
                Effect::SelectionChanged(None)
            } else {
                Effect::None
            }
        }
    }
}
