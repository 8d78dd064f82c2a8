// ABOUTME: Counter header rendering
// ABOUTME: Shows how many thoughts this session liked and posted

use crate::app::App;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(" ♥ ", Style::default().red()),
        Span::raw(format!("Liked thoughts: {}", app.liked_count())),
        Span::styled("  │  ", Style::default().dim()),
        Span::styled("✎ ", Style::default().cyan()),
        Span::raw(format!("Posted thoughts: {}", app.posted_count())),
    ]);

    let para = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().dim())
            .title(" Happy Thoughts "),
    );
    f.render_widget(para, area);
}
