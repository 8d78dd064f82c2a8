// ABOUTME: Central application state and event handling
// ABOUTME: Owns the ThoughtStore; key handling returns Actions that run.rs turns into requests

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use happy_client::{
    validate_message, Completion, Filter, LikeAction, Request, Thought, ThoughtStore,
    ValidationError,
};
use ratatui::style::Style;
use tui_textarea::TextArea;

use crate::types::Focus;

const DOUBLE_CTRL_C: Duration = Duration::from_millis(500);
const PLACEHOLDER: &str = "What's making you happy right now?";

/// Actions that need async handling (returned from handle_key)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Post a message that already passed validation
    Submit(String),
    ToggleLike { id: String, action: LikeAction },
    Refresh,
}

/// Central application state
pub struct App {
    pub store: ThoughtStore,

    pub focus: Focus,

    // Compose state
    pub input: TextArea<'static>,
    pub warning: Option<ValidationError>,
    pub posting: bool,

    // Feed state
    pub selected: usize,
    /// Thought ids with a like/unlike request in flight
    pub pending_likes: HashSet<String>,

    // Quit handling
    pub last_ctrl_c: Option<Instant>,

    // Throbber animation frame
    pub throbber_frame: usize,
}

fn new_input() -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_placeholder_text(PLACEHOLDER);
    input.set_cursor_line_style(Style::default());
    input
}

impl App {
    pub fn new(store: ThoughtStore) -> Self {
        Self {
            store,
            focus: Focus::Compose,
            input: new_input(),
            warning: None,
            posting: false,
            selected: 0,
            pending_likes: HashSet::new(),
            last_ctrl_c: None,
            throbber_frame: 0,
        }
    }

    /// Advance throbber animation
    pub fn tick(&mut self) {
        self.throbber_frame = (self.throbber_frame + 1) % 8;
    }

    /// Get current throbber character
    pub fn throbber_char(&self) -> char {
        const THROBBER: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];
        THROBBER[self.throbber_frame]
    }

    /// Thoughts shown under the active filter
    pub fn visible_thoughts(&self) -> &[Thought] {
        let state = self.store.state();
        match state.filter {
            Filter::All => state.thoughts.as_deref().unwrap_or(&[]),
            Filter::Liked => &state.liked_thoughts,
            Filter::Sent => &state.sent_thoughts,
        }
    }

    pub fn selected_thought(&self) -> Option<&Thought> {
        self.visible_thoughts().get(self.selected)
    }

    pub fn liked_count(&self) -> usize {
        self.store.state().liked_thoughts.len()
    }

    pub fn posted_count(&self) -> usize {
        self.store.state().sent_thoughts.len()
    }

    /// Pending message as typed
    pub fn input_text(&self) -> String {
        self.input.lines().join(" ")
    }

    /// Handle a key event, returning an action if needed
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Global keys
        match key.code {
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Action::Quit);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(last) = self.last_ctrl_c {
                    if last.elapsed() < DOUBLE_CTRL_C {
                        return Some(Action::Quit);
                    }
                }
                self.last_ctrl_c = Some(Instant::now());
                return None;
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Action::Refresh);
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
                return None;
            }
            KeyCode::Esc => {
                self.store.set_error(None);
                self.warning = None;
                return None;
            }
            KeyCode::F(1) => return self.select_filter(Filter::All),
            KeyCode::F(2) => return self.select_filter(Filter::Liked),
            KeyCode::F(3) => return self.select_filter(Filter::Sent),
            _ => {}
        }

        match self.focus {
            Focus::Compose => self.handle_compose_key(key),
            Focus::Feed => self.handle_feed_key(key),
        }
    }

    fn select_filter(&mut self, filter: Filter) -> Option<Action> {
        self.selected = 0;
        if self.store.set_filter(filter) {
            Some(Action::Refresh)
        } else {
            None
        }
    }

    fn handle_compose_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => self.submit(),
            // Pass to textarea; any edit clears the warning
            _ => {
                if self.input.input(key) {
                    self.warning = None;
                }
                None
            }
        }
    }

    fn handle_feed_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.visible_thoughts().len().saturating_sub(1);
                self.selected = (self.selected + 1).min(max);
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => {
                self.selected = self.visible_thoughts().len().saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char('l') => return self.toggle_like_selected(),
            _ => {}
        }
        None
    }

    /// Validate the pending message; only a valid one becomes an action.
    pub fn submit(&mut self) -> Option<Action> {
        if self.posting {
            return None;
        }
        let text = self.input_text();
        match validate_message(&text) {
            Ok(message) => {
                self.warning = None;
                Some(Action::Submit(message.to_string()))
            }
            Err(e) => {
                tracing::debug!(len = e.len, "Rejected message");
                self.warning = Some(e);
                None
            }
        }
    }

    fn toggle_like_selected(&self) -> Option<Action> {
        let thought = self.selected_thought()?;
        // The liked set only changes when the reply lands
        if self.pending_likes.contains(&thought.id) {
            return None;
        }
        let liked = self.store.state().is_liked(&thought.id);
        Some(Action::ToggleLike {
            id: thought.id.clone(),
            action: LikeAction::toggle_for(liked),
        })
    }

    /// Insert pasted text into the compose box
    pub fn handle_paste(&mut self, text: &str) {
        if self.focus != Focus::Compose {
            return;
        }
        let single_line = text.replace(['\r', '\n'], " ");
        if self.input.insert_str(single_line) {
            self.warning = None;
        }
    }

    /// Turn an action into a request for the API, updating local state.
    pub fn request_for(&mut self, action: Action) -> Option<Request> {
        match action {
            Action::Quit => None,
            Action::Submit(message) => {
                self.posting = true;
                Some(Request::Post(message))
            }
            Action::ToggleLike { id, action } => {
                if !self.pending_likes.insert(id.clone()) {
                    tracing::debug!(thought_id = %id, "Like already in flight");
                    return None;
                }
                Some(Request::Like { id, action })
            }
            Action::Refresh => {
                self.selected = 0;
                Some(self.store.begin_fetch())
            }
        }
    }

    /// Apply a finished request to the store
    pub fn handle_completion(&mut self, completion: Completion) {
        let posted = match &completion {
            Completion::Posted(result) => Some(result.is_ok()),
            Completion::Liked { id, .. } => {
                self.pending_likes.remove(id);
                None
            }
            _ => None,
        };

        self.store.apply(completion);

        if let Some(ok) = posted {
            self.posting = false;
            if ok {
                self.input = new_input();
            }
        }

        let max = self.visible_thoughts().len().saturating_sub(1);
        self.selected = self.selected.min(max);
    }

    /// Check if Ctrl+C hint should be shown
    pub fn show_ctrl_c_hint(&self) -> bool {
        self.last_ctrl_c
            .map(|t| t.elapsed() < DOUBLE_CTRL_C)
            .unwrap_or(false)
    }
}
