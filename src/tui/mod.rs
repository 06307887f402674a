//! # TUI Adapter
//!
//! The ratatui-specific host for the loader. Renders Visible Items, maps keys
//! to list commands, and tells the controller when the viewport nears the end.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Loop
//!
//! Each iteration: draw if something changed, report near-end after drawing
//! (ratatui settles the scroll offset during render), handle input, then
//! `pump()` completed fetches into the controller. Fetch results are applied
//! here and nowhere else.
//!
//! While a page is loading the loop redraws every ~80ms to animate the
//! spinner; otherwise it idles up to 500ms between polls.

mod component;
mod components;
mod event;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::SourceKind;
use crate::core::config::ResolvedConfig;
use crate::core::{Controller, ListEvent, LoadStatus};
use crate::source::{Entry, FetchError, FileSource, PageSource, SearchSource};
use crate::tui::component::EventHandler;
use crate::tui::components::{EntryListState, ListCommand};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of the loader)
pub struct TuiState {
    pub entry_list: EntryListState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            entry_list: EntryListState::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores the terminal when dropped, including on an early `?` return.
struct TerminalGuard {
    restore: fn(),
}

impl TerminalGuard {
    fn new() -> Self {
        Self {
            restore: ratatui::restore,
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        (self.restore)();
        info!("Terminal restored");
    }
}

struct MouseCaptureGuard;

impl MouseCaptureGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Mouse capture enabled");
        Ok(Self)
    }
}

impl Drop for MouseCaptureGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Build the page source a resolved config asks for.
pub fn build_source(config: &ResolvedConfig) -> Result<Arc<dyn PageSource<Entry>>, FetchError> {
    match config.source {
        SourceKind::Search => Ok(Arc::new(
            SearchSource::new(
                config.search_url.clone(),
                config.query.clone(),
                config.page_size,
            )
            .with_prerelease(config.include_prerelease),
        )),
        SourceKind::File => {
            let path: PathBuf = config.file_path.clone().ok_or_else(|| {
                FetchError::Config(
                    "file source needs a path (--file or [file] path in config)".to_string(),
                )
            })?;
            Ok(Arc::new(
                FileSource::new(path, config.page_size)
                    .with_latency(Duration::from_millis(config.file_latency_ms)),
            ))
        }
    }
}

pub fn run(config: ResolvedConfig, source: Arc<dyn PageSource<Entry>>) -> std::io::Result<()> {
    let mut controller: Controller<Entry> = Controller::new();
    let mut tui = TuiState::new();
    controller.set_source(source);

    let mut terminal = ratatui::init();
    let _terminal_guard = TerminalGuard::new();
    let _mouse_guard = MouseCaptureGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true;

    loop {
        let loading = controller.status() == LoadStatus::Loading;
        if loading {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, controller.list(), &mut tui, spinner_frame))?;
            needs_redraw = false;

            // Gated on Ready inside the controller; safe to call every frame.
            if tui.entry_list.is_near_end(config.prefetch_margin) {
                controller.notify_near_end();
            }
        }

        let timeout = if loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Quit => should_quit = true,
                TuiEvent::Resize => {}
                _ => match tui.entry_list.handle_event(&event) {
                    Some(ListCommand::Select(index)) => controller.select(Some(index)),
                    Some(ListCommand::Retry) => {
                        if controller.status() == LoadStatus::ErrorOccurred {
                            controller.retry_after_error();
                        }
                    }
                    Some(ListCommand::Reload) => controller.reload(),
                    None => {}
                },
            }
        }

        if should_quit {
            break;
        }

        if controller.pump() > 0 {
            needs_redraw = true;
        }
        for event in controller.drain_events() {
            needs_redraw = true;
            match event {
                ListEvent::SelectionChanged(index) => {
                    info!("Selection changed: {:?}", index);
                }
                ListEvent::StatusChanged(LoadStatus::ErrorOccurred) => {
                    let message = controller
                        .marker()
                        .and_then(|m| m.error_message.as_deref())
                        .unwrap_or_default();
                    warn!("List load failed: {}", message);
                }
                ListEvent::StatusChanged(status) => {
                    info!("Status: {}", status);
                }
            }
        }
    }

    Ok(())
}
