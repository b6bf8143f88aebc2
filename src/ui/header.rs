use crate::ui::theme::{ACCENT, FOCUS_BORDER, GLOBAL_BORDER, MUTED, TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// The query field across the top of the list view.
pub struct SearchBar<'a> {
    input: &'a str,
    editing: bool,
    focused: bool,
}

impl<'a> SearchBar<'a> {
    pub fn new(input: &'a str, editing: bool, focused: bool) -> Self {
        Self {
            input,
            editing,
            focused,
        }
    }

    pub fn widget(&self) -> Paragraph<'a> {
        let content = if self.input.is_empty() && !self.editing {
            Span::styled(
                "Search recipes (press / to type)",
                Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::styled(self.input, Style::default().fg(TEXT))
        };

        let border = if self.focused { FOCUS_BORDER } else { GLOBAL_BORDER };
        let line = Line::from(vec![Span::styled(" 🔍 ", Style::default().fg(ACCENT)), content]);

        Paragraph::new(line).block(
            Block::default()
                .title(" Recipes ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
    }

    /// Cursor column offset from the widget's left edge while editing.
    pub fn cursor_offset(&self) -> u16 {
        // border + " 🔍 " (the emoji is two cells wide)
        let prefix = 1 + 4;
        prefix + self.input.chars().count() as u16
    }
}
