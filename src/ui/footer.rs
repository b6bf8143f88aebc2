use crate::search::SearchView;
use crate::ui::format::pager;
use crate::ui::theme::{GLOBAL_BORDER, TEXT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const LIST_HINTS: &str =
    "/: Search │ Tab: Focus │ ←/→: Adjust │ Space: Toggle │ n/p: Page │ Enter: Open │ q: Quit ";
const DETAIL_HINTS: &str = "Esc: Back │ ↑/↓: Scroll │ q: Quit ";

pub struct Footer;

impl Footer {
    /// Pager on the left (list view only), key hints on the right.
    pub fn widget(area: Rect, view: Option<&SearchView<'_>>) -> Paragraph<'static> {
        let hints = if view.is_some() { LIST_HINTS } else { DETAIL_HINTS };
        let left = match view {
            Some(view) if view.show_results() => {
                let mut text = pager(view.page, view.total_pages);
                if view.can_prev {
                    text = format!("‹ {}", text);
                }
                if view.can_next {
                    text = format!("{} ›", text);
                }
                format!(" {} ", text)
            }
            _ => String::new(),
        };

        // Padding by char count, not bytes
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(hints.chars().count())
            .saturating_sub(left.chars().count());

        let text_style = Style::default().fg(TEXT).add_modifier(Modifier::DIM);
        let line = Line::from(vec![
            Span::styled(left, Style::default().fg(TEXT)),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(hints, text_style),
        ]);

        Paragraph::new(line).alignment(Alignment::Left).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
