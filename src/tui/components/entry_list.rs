//! # EntryList Component
//!
//! Scrollable view of the loader's Visible Items: one line per entry, then
//! the status row while the list is still open-ended.
//!
//! `EntryList` is a transient component (created each frame) that wraps
//! `&'a mut EntryListState` (persistent state) and the `ScrollList` (props).
//! During render it records the viewport height and the scroll offset ratatui
//! settled on, which is what [`EntryListState::is_near_end`] reads afterwards.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState};

use crate::core::{LoadStatus, Row, ScrollList, StatusMarker};
use crate::source::Entry;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Commands the list emits for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCommand {
    Select(usize),
    Retry,
    Reload,
}

/// Scroll and layout state for the entry list.
/// Must be persisted in the parent TuiState.
pub struct EntryListState {
    pub list_state: ListState,
    /// Rows visible inside the border, from the last render
    pub viewport_height: usize,
    /// Data items (marker excluded), from the last render
    pub item_count: usize,
    /// Total rows including the marker, from the last render
    pub row_count: usize,
}

impl Default for EntryListState {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryListState {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
            viewport_height: 0,
            item_count: 0,
            row_count: 0,
        }
    }

    /// True when the bottom of the viewport is within `margin` rows of the end.
    pub fn is_near_end(&self, margin: usize) -> bool {
        is_near_end(
            self.list_state.offset(),
            self.viewport_height,
            self.row_count,
            margin,
        )
    }

    fn move_to(&self, target: usize) -> Option<ListCommand> {
        if self.item_count == 0 {
            return None;
        }
        let target = target.min(self.item_count - 1);
        (self.list_state.selected() != Some(target)).then_some(ListCommand::Select(target))
    }
}

pub fn is_near_end(offset: usize, viewport_height: usize, row_count: usize, margin: usize) -> bool {
    row_count > 0 && offset + viewport_height + margin >= row_count
}

impl EventHandler for EntryListState {
    type Event = ListCommand;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListCommand> {
        let current = self.list_state.selected();
        let page = self.viewport_height.max(1);
        match event {
            TuiEvent::CursorUp => self.move_to(current.map_or(0, |i| i.saturating_sub(1))),
            TuiEvent::CursorDown => self.move_to(current.map_or(0, |i| i + 1)),
            TuiEvent::PageUp => self.move_to(current.map_or(0, |i| i.saturating_sub(page))),
            TuiEvent::PageDown => self.move_to(current.map_or(0, |i| i + page)),
            TuiEvent::Home => self.move_to(0),
            TuiEvent::End => self.move_to(usize::MAX),
            TuiEvent::Retry => Some(ListCommand::Retry),
            TuiEvent::Reload => Some(ListCommand::Reload),
            TuiEvent::Quit | TuiEvent::Resize => None,
        }
    }
}

fn marker_line(marker: &StatusMarker, spinner_frame: usize) -> Line<'static> {
    let (prefix, style) = match marker.status {
        LoadStatus::Loading => (
            format!("{} ", SPINNER[spinner_frame % SPINNER.len()]),
            Style::default().fg(Color::Yellow),
        ),
        LoadStatus::ErrorOccurred => (
            String::new(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        _ => (String::new(), Style::default().fg(Color::DarkGray)),
    };
    let mut text = format!("{prefix}{}", marker.text());
    if marker.status == LoadStatus::ErrorOccurred {
        text.push_str("  (press r to retry)");
    }
    Line::from(Span::styled(text, style))
}

fn entry_line(entry: &Entry) -> Line<'_> {
    let mut spans = vec![Span::styled(
        entry.title.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(summary) = &entry.summary {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            summary.as_str(),
            Style::default().fg(Color::Gray),
        ));
    }
    Line::from(spans)
}

pub struct EntryList<'a> {
    pub state: &'a mut EntryListState,
    pub list: &'a ScrollList<Entry>,
    pub spinner_frame: usize,
}

impl<'a> EntryList<'a> {
    pub fn new(
        state: &'a mut EntryListState,
        list: &'a ScrollList<Entry>,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            list,
            spinner_frame,
        }
    }
}

impl<'a> Component for EntryList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .list
            .rows()
            .map(|row| match row {
                Row::Item(entry) => ListItem::new(entry_line(entry)),
                Row::Status(marker) => ListItem::new(marker_line(marker, self.spinner_frame)),
            })
            .collect();

        let title = format!(" {} items ", self.list.items().len());
        let widget = List::new(items)
            .block(Block::bordered().title(title))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");

        self.state.viewport_height = area.height.saturating_sub(2) as usize;
        self.state.item_count = self.list.items().len();
        self.state.row_count = self.list.row_count();
        self.state.list_state.select(self.list.selected_index());

        frame.render_stateful_widget(widget, area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(items: usize, selected: Option<usize>, viewport: usize) -> EntryListState {
        let mut s = EntryListState::new();
        s.item_count = items;
        s.row_count = items + 1;
        s.viewport_height = viewport;
        s.list_state.select(selected);
        s
    }

    #[test]
    fn test_near_end_threshold() {
        assert!(!is_near_end(0, 10, 0, 2));
        assert!(!is_near_end(0, 10, 20, 2));
        assert!(is_near_end(8, 10, 20, 2));
        assert!(is_near_end(0, 10, 5, 0));
        assert!(!is_near_end(7, 10, 20, 2));
    }

    #[test]
    fn test_cursor_down_stops_before_marker() {
        let mut s = state(3, Some(2), 10);
        assert_eq!(s.handle_event(&TuiEvent::CursorDown), None);
        let mut s = state(3, Some(1), 10);
        assert_eq!(
            s.handle_event(&TuiEvent::CursorDown),
            Some(ListCommand::Select(2))
        );
    }

    #[test]
    fn test_page_down_clamps() {
        let mut s = state(30, Some(25), 10);
        assert_eq!(
            s.handle_event(&TuiEvent::PageDown),
            Some(ListCommand::Select(29))
        );
    }

    #[test]
    fn test_home_and_end() {
        let mut s = state(5, Some(2), 10);
        assert_eq!(s.handle_event(&TuiEvent::Home), Some(ListCommand::Select(0)));
        assert_eq!(s.handle_event(&TuiEvent::End), Some(ListCommand::Select(4)));
    }

    #[test]
    fn test_navigation_on_empty_list() {
        let mut s = state(0, None, 10);
        assert_eq!(s.handle_event(&TuiEvent::CursorDown), None);
        assert_eq!(s.handle_event(&TuiEvent::Retry), Some(ListCommand::Retry));
    }

    #[test]
    fn test_error_marker_mentions_retry() {
        let marker = StatusMarker {
            status: LoadStatus::ErrorOccurred,
            loading_message: String::new(),
            error_message: Some("An error occurred: boom".into()),
        };
        let line = marker_line(&marker, 0);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("boom"));
        assert!(text.contains("press r"));
    }
}
