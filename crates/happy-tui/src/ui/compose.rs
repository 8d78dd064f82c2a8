// ABOUTME: Compose box rendering
// ABOUTME: Textarea with a live character count and the validation warning line

use happy_client::MAX_MESSAGE_LEN;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::types::Focus;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let len = app.input_text().chars().count();
    let count_style = if len > MAX_MESSAGE_LEN {
        Style::default().red()
    } else {
        Style::default().dim()
    };

    let title = if app.posting {
        format!(" {} Sending... ", app.throbber_char())
    } else {
        " What's making you happy right now? ".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if app.focus == Focus::Compose {
            Style::default().cyan()
        } else {
            Style::default().dim()
        })
        .title(title)
        .title_bottom(
            Line::styled(format!(" {}/{} ", len, MAX_MESSAGE_LEN), count_style).right_aligned(),
        );

    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(&app.input, inner);
}

pub fn render_warning(f: &mut Frame, area: Rect, app: &App) {
    if let Some(warning) = &app.warning {
        let para = Paragraph::new(Line::styled(
            format!(" ⚠ {}", warning),
            Style::default().yellow(),
        ));
        f.render_widget(para, area);
    }
}
