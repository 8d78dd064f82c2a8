// ABOUTME: Bottom status bar rendering
// ABOUTME: Shows filter, loading spinner, errors and keybinds

use crate::app::App;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let state = app.store.state();
    let mut spans: Vec<Span> = vec![];

    spans.push(Span::styled(
        format!(" {} ", state.filter),
        Style::default().bold(),
    ));

    if state.loading {
        spans.push(Span::styled(
            format!("{} ", app.throbber_char()),
            Style::default().cyan(),
        ));
    }

    // Error or Ctrl+C hint
    if let Some(err) = &state.error {
        spans.push(Span::styled(format!("│ ✗ {} ", err), Style::default().red()));
    } else if app.show_ctrl_c_hint() {
        spans.push(Span::styled(
            "│ Press Ctrl+C again to quit ",
            Style::default().yellow(),
        ));
    }

    spans.push(Span::styled(
        "│ Tab: focus │ F1/F2/F3: all/liked/sent │ Ctrl+R: refresh │ Ctrl+Q: quit ",
        Style::default().dim(),
    ));

    let line = Line::from(spans);
    let para = Paragraph::new(line).style(Style::default().on_dark_gray());
    f.render_widget(para, area);
}
