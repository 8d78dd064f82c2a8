// ABOUTME: Feed rendering
// ABOUTME: One card per thought with its like toggle; loading and empty states

use chrono::{DateTime, Utc};
use happy_client::{Filter, Thought};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::types::{format_created, Focus};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let state = app.store.state();
    let focused = app.focus == Focus::Feed;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().cyan()
        } else {
            Style::default().dim()
        })
        .title(format!(" Feed: {} ", state.filter));

    // Nothing fetched yet
    if state.filter == Filter::All && state.thoughts.is_none() {
        let para = Paragraph::new(Line::styled("Loading", Style::default().dim())).block(block);
        f.render_widget(para, area);
        return;
    }

    let thoughts = app.visible_thoughts();
    if thoughts.is_empty() {
        let message = Line::styled(empty_message(state.filter), Style::default().dim());
        let para = Paragraph::new(message)
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(para, area);
        return;
    }

    let now = Utc::now();
    let width = block.inner(area).width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = thoughts
        .iter()
        .map(|t| card(t, state.is_liked(&t.id), now, width))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused {
            Style::default().reversed()
        } else {
            Style::default()
        })
        .highlight_symbol("▌ ");

    let mut list_state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn empty_message(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "No thoughts yet. Be the first!",
        Filter::Liked => "You haven't liked any thoughts in this session.",
        Filter::Sent => "You haven't posted any thoughts in this session.",
    }
}

fn card(thought: &Thought, liked: bool, now: DateTime<Utc>, width: usize) -> ListItem<'static> {
    let mut lines: Vec<Line> = wrap(&thought.message, width.max(10))
        .into_iter()
        .map(Line::raw)
        .collect();

    let heart = if liked {
        Span::styled("♥", Style::default().red().bold())
    } else {
        Span::styled("♡", Style::default().dim())
    };
    lines.push(Line::from(vec![
        heart,
        Span::raw(format!(" x {}", thought.like_count)),
        Span::styled(
            format!("   {}", format_created(thought.created_at, now)),
            Style::default().dim(),
        ),
    ]));
    lines.push(Line::raw(""));

    ListItem::new(lines)
}

/// Greedy word wrap; List items don't wrap on their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
