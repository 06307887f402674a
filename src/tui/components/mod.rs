//! # TUI Components
//!
//! All UI components for the terminal host.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: source label, item count and loader status
//! - `DetailPane`: the selected entry in full
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `EntryList`: the Visible Items, with selection and near-end detection
//!
//! Components receive external data as "props" (struct fields), not by
//! reaching into the controller. Persistent state lives in `TuiState` and is
//! borrowed by a transient wrapper each frame.

pub mod detail;
pub mod entry_list;
pub mod title_bar;

pub use detail::DetailPane;
pub use entry_list::{EntryList, EntryListState, ListCommand};
pub use title_bar::TitleBar;
