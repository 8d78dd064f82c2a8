// ABOUTME: UI rendering module for happy-tui
// ABOUTME: Dispatches rendering to widget modules

mod compose;
mod counters;
mod feed;
mod status;

use crate::app::App;
use ratatui::prelude::*;
use ratatui::Frame;

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Liked / posted counters
        Constraint::Min(1),    // Feed
        Constraint::Length(3), // Compose box
        Constraint::Length(1), // Validation warning
        Constraint::Length(1), // Status bar
    ])
    .split(f.area());

    counters::render(f, chunks[0], app);
    feed::render(f, chunks[1], app);
    compose::render(f, chunks[2], app);
    compose::render_warning(f, chunks[3], app);
    status::render(f, chunks[4], app);
}
