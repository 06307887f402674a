//! # List State
//!
//! Everything the loader owns, in one place. Nothing outside `core` mutates
//! it; changes go through `update(state, action)` in action.rs.
//!
//! ```text
//! ScrollList<T>
//! ├── items: Vec<T>                      // data items, in fetch order
//! ├── marker: StatusMarker               // status pseudo-row
//! ├── marker_visible: bool               // marker is the trailing row
//! ├── next_start: usize                  // start index of the next fetch
//! ├── generation: u64                    // id of the live fetch
//! ├── cancel: CancellationToken          // signal for the live fetch
//! ├── source: Option<Arc<dyn PageSource>>
//! ├── source_epoch: u64                  // bumped when the source is swapped
//! ├── selected: Option<usize>            // index into items
//! └── auto_select_armed: bool            // select row 0 on first page
//! ```

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::source::PageSource;

/// Where the loader is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Idle with more items available. Near-end triggers fetch.
    Ready,
    Loading,
    /// Terminal: the list is complete. The marker row is hidden.
    NoMoreItems,
    /// The source returned nothing at all.
    NoItemsFound,
    ErrorOccurred,
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadStatus::Ready => "ready",
            LoadStatus::Loading => "loading",
            LoadStatus::NoMoreItems => "no more items",
            LoadStatus::NoItemsFound => "no items found",
            LoadStatus::ErrorOccurred => "error",
        };
        f.write_str(s)
    }
}

/// The status pseudo-row shown after the data items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMarker {
    pub status: LoadStatus,
    pub loading_message: String,
    pub error_message: Option<String>,
}

impl StatusMarker {
    fn new() -> Self {
        Self {
            status: LoadStatus::Ready,
            loading_message: String::from("Loading..."),
            error_message: None,
        }
    }

    /// User-facing text for the row.
    pub fn text(&self) -> &str {
        match self.status {
            LoadStatus::Ready => "",
            LoadStatus::Loading => &self.loading_message,
            LoadStatus::NoMoreItems => "No more items.",
            LoadStatus::NoItemsFound => "No items found.",
            LoadStatus::ErrorOccurred => self
                .error_message
                .as_deref()
                .unwrap_or("An error occurred."),
        }
    }
}

/// A row of Visible Items: a data item or the trailing status marker.
#[derive(Debug, PartialEq)]
pub enum Row<'a, T> {
    Item(&'a T),
    Status(&'a StatusMarker),
}

pub struct ScrollList<T> {
    pub(crate) items: Vec<T>,
    pub(crate) marker: StatusMarker,
    pub(crate) marker_visible: bool,
    pub(crate) next_start: usize,
    pub(crate) generation: u64,
    pub(crate) cancel: CancellationToken,
    pub(crate) source: Option<Arc<dyn PageSource<T>>>,
    pub(crate) source_epoch: u64,
    pub(crate) selected: Option<usize>,
    pub(crate) auto_select_armed: bool,
}

impl<T> Default for ScrollList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ScrollList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            marker: StatusMarker::new(),
            marker_visible: false,
            next_start: 0,
            generation: 0,
            cancel: CancellationToken::new(),
            source: None,
            source_epoch: 0,
            selected: None,
            auto_select_armed: false,
        }
    }

    /// Data items, without the marker.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn status(&self) -> LoadStatus {
        self.marker.status
    }

    /// The marker, if it is currently part of Visible Items.
    pub fn marker(&self) -> Option<&StatusMarker> {
        self.marker_visible.then_some(&self.marker)
    }

    /// Visible Items in display order: data items, then the marker if shown.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_, T>> {
        self.items
            .iter()
            .map(Row::Item)
            .chain(self.marker().map(Row::Status))
    }

    pub fn row_count(&self) -> usize {
        self.items.len() + usize::from(self.marker_visible)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }

    pub fn next_start(&self) -> usize {
        self.next_start
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn source_label(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.label())
    }
}
