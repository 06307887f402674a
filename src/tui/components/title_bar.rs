//! # TitleBar Component
//!
//! Top status line: the active source's label and the loader status.
//!
//! TitleBar is purely presentational. It receives all data as props and
//! has no internal state.

use crate::core::LoadStatus;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub struct TitleBar {
    /// Label of the active page source (e.g. "Searching for 'json'...")
    pub source_label: String,
    pub status: LoadStatus,
    pub item_count: usize,
}

impl TitleBar {
    pub fn new(source_label: String, status: LoadStatus, item_count: usize) -> Self {
        Self {
            source_label,
            status,
            item_count,
        }
    }

    /// The single line of text the bar shows.
    pub fn text(&self) -> String {
        let source = self.source_label.trim_end_matches("...");
        format!(
            "Pagewise | {} | {} items | {}",
            source, self.item_count, self.status
        )
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = match self.status {
            LoadStatus::ErrorOccurred => Style::default().fg(Color::Red),
            LoadStatus::Loading => Style::default().fg(Color::Yellow),
            _ => Style::default(),
        };
        frame.render_widget(Span::styled(self.text(), style), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_includes_source_and_status() {
        let bar = TitleBar::new("Searching for 'json'...".into(), LoadStatus::Ready, 25);
        assert_eq!(bar.text(), "Pagewise | Searching for 'json' | 25 items | ready");
    }

    #[test]
    fn test_text_for_terminal_state() {
        let bar = TitleBar::new("Loading list.txt...".into(), LoadStatus::NoMoreItems, 3);
        assert!(bar.text().ends_with("no more items"));
    }
}
