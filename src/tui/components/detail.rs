//! # DetailPane Component
//!
//! Shows the selected entry in full below the list. Stateless.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::source::Entry;
use crate::tui::component::Component;

pub struct DetailPane<'a> {
    pub entry: Option<&'a Entry>,
}

impl<'a> DetailPane<'a> {
    pub fn new(entry: Option<&'a Entry>) -> Self {
        Self { entry }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        match self.entry {
            None => vec![Line::from(Span::styled(
                "Nothing selected",
                Style::default().fg(Color::DarkGray),
            ))],
            Some(entry) => {
                let mut lines = vec![Line::from(Span::styled(
                    entry.title.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ))];
                if let Some(summary) = &entry.summary {
                    lines.push(Line::from(summary.as_str()));
                }
                lines
            }
        }
    }
}

impl<'a> Component for DetailPane<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.lines())
            .block(Block::bordered().title(" Details "))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
