use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::panel::{self, RowStyle};
use crate::util::text::display_width;

use super::app::App;

/// Render the task panel: a bordered block with one line per visible task.
/// The border turns to the error color when the last fetch cycle failed.
pub fn render_panel(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let border_color = if app.last_error.is_some() {
        theme.border_error
    } else {
        theme.border
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.background))
        .title(Span::styled(
            format!(" {} ", panel::PANEL_TITLE),
            Style::default().fg(theme.title),
        ));
    if let Some(at) = app.last_refresh {
        block = block.title_bottom(Span::styled(
            format!(" updated {} ", at.format("%H:%M:%S")),
            Style::default().fg(theme.dim),
        ));
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(message) = &app.last_error {
        let error = Paragraph::new(message.as_str())
            .style(Style::default().fg(theme.error_text).bg(theme.background))
            .wrap(Wrap { trim: false });
        frame.render_widget(error, inner);
        return;
    }

    let visible = panel::visible_tasks(&app.tasks);
    if visible.is_empty() {
        let empty = Paragraph::new(panel::EMPTY_BODY)
            .style(Style::default().fg(theme.dim).bg(theme.background));
        frame.render_widget(empty, inner);
        return;
    }

    let rows = panel::build_rows(&visible, &app.config.display, Some(app.selected));

    // Keep the selection on screen
    let height = inner.height as usize;
    let skip = if height == 0 {
        0
    } else {
        app.selected.saturating_sub(height - 1)
    };

    let width = inner.width as usize;
    let lines: Vec<Line> = rows
        .iter()
        .skip(skip)
        .take(height)
        .map(|row| {
            let style = match row.style {
                RowStyle::Selected => Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection_bg),
                RowStyle::Normal => Style::default().fg(theme.text).bg(theme.background),
            };
            let mut text = row.text.clone();
            // stretch the row background across the panel
            let w = display_width(&text);
            if w < width {
                text.push_str(&" ".repeat(width - w));
            }
            Line::from(Span::styled(text, style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
