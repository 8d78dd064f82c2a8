// ABOUTME: Interactive TUI event loop
// ABOUTME: Sets up the terminal, spawns API requests and applies their completions

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use happy_client::{Completion, HttpThoughtsApi, Request, ThoughtStore, ThoughtsApi};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;

use crate::app::{Action, App};
use crate::config::Config;
use crate::error::Result;
use crate::event::{EventStream, TuiEvent};
use crate::ui;

const TICK_RATE: Duration = Duration::from_millis(100);

/// RAII guard for terminal cleanup
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Build the store for this session and run the TUI until the user quits.
pub async fn run_tui(config: &Config) -> Result<()> {
    let api: Arc<dyn ThoughtsApi> = Arc::new(HttpThoughtsApi::new(
        &config.api.base_url,
        config.api.timeout(),
    )?);
    let store = ThoughtStore::restore(api, config.session.open_storage());
    let mut app = App::new(store);

    tracing::info!(
        base_url = %config.api.base_url,
        session = %config.session.session_id(),
        "Starting TUI"
    );

    let _guard = TerminalGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    run_loop(&mut terminal, &mut app).await
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
    let mut events = EventStream::new(TICK_RATE);

    // Initial load
    if let Some(request) = app.request_for(Action::Refresh) {
        dispatch(app, request, &done_tx);
    }

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        tokio::select! {
            Some(event) = events.next() => match event {
                TuiEvent::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match app.handle_key(key) {
                        Some(Action::Quit) => break,
                        Some(action) => {
                            if let Some(request) = app.request_for(action) {
                                dispatch(app, request, &done_tx);
                            }
                        }
                        None => {}
                    }
                }
                TuiEvent::Paste(text) => app.handle_paste(&text),
                TuiEvent::Resize(_, _) => {}
                TuiEvent::Tick => app.tick(),
            },
            Some(completion) = done_rx.recv() => app.handle_completion(completion),
            else => break,
        }
    }

    Ok(())
}

/// Run a request in the background; its completion comes back over `done_tx`.
fn dispatch(app: &App, request: Request, done_tx: &mpsc::UnboundedSender<Completion>) {
    let api = app.store.api();
    let tx = done_tx.clone();
    tracing::debug!(?request, "Dispatching request");
    tokio::spawn(async move {
        let completion = request.send(api.as_ref()).await;
        let _ = tx.send(completion);
    });
}
