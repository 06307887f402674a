//! # Core Loader Logic
//!
//! This module contains the incremental list loader.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ScrollList (state)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Controller (owner)   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Search   │      │    File    │
//!     │  Adapter   │      │   Source   │      │   Source   │
//!     │ (ratatui)  │      │ (reqwest)  │      │ (tokio fs) │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `ScrollList`, the items, status marker and fetch generation
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`fetch`]: runs a fetch ticket on tokio
//! - [`controller`]: owns the list and applies completions in order
//! - [`config`]: settings file and override resolution

pub mod action;
pub mod config;
pub mod controller;
pub mod fetch;
pub mod state;

pub use action::{Action, Effect, FetchTicket, TicketId, update};
pub use controller::{Controller, ListEvent};
pub use state::{LoadStatus, Row, ScrollList, StatusMarker};
