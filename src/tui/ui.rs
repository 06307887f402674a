use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::ScrollList;
use crate::source::Entry;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{DetailPane, EntryList, TitleBar};

const HELP: &str = "↑/↓ move  PgUp/PgDn page  r retry  R reload  q quit";

pub fn draw_ui(frame: &mut Frame, list: &ScrollList<Entry>, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(3), Length(4), Length(1)]);
    let [title_area, list_area, detail_area, help_area] = layout.areas(frame.area());

    TitleBar::new(
        list.source_label().unwrap_or("No source").to_string(),
        list.status(),
        list.items().len(),
    )
    .render(frame, title_area);

    EntryList::new(&mut tui.entry_list, list, spinner_frame).render(frame, list_area);

    DetailPane::new(list.selected_item()).render(frame, detail_area);

    frame.render_widget(
        Span::styled(HELP, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}
