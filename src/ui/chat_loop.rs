//! Main chat event loop
//!
//! This module owns the terminal lifecycle and the event loop that
//! drives user input, dispatches inference requests, and applies their
//! outcomes to the conversation.

use std::{error::Error, io, time::Duration};

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::core::app::App;
use crate::core::config::Config;
use crate::core::constants::INFER_ENDPOINT;
use crate::core::conversation::Conversation;
use crate::core::history::HistoryStore;
use crate::core::infer::{InferenceService, RequestParams, TurnOutcome};
use crate::ui::renderer::ui;

type ChatTerminal = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> Result<ChatTerminal, Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).inspect_err(|_| {
        let _ = disable_raw_mode();
    })?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut ChatTerminal) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

pub async fn run_chat() -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    let store = HistoryStore::open_default()?;
    let (messages, notice) = store.load_or_quarantine();

    let theme_name = config.theme.as_deref().unwrap_or("dark").to_string();
    let mut app = App::new(Conversation::from_messages(messages), &theme_name);
    app.status = notice;

    let client = reqwest::Client::new();
    let (service, mut rx) = InferenceService::new();

    // Setup terminal only after everything fallible has succeeded.
    let mut terminal = setup_terminal()?;
    let result = run_event_loop(
        &mut terminal,
        &mut app,
        &client,
        &service,
        &mut rx,
        &store,
        &mut config,
    )
    .await;
    restore_terminal(&mut terminal)?;

    result
}

#[allow(clippy::too_many_arguments)]
async fn run_event_loop(
    terminal: &mut ChatTerminal,
    app: &mut App,
    client: &reqwest::Client,
    service: &InferenceService,
    rx: &mut mpsc::UnboundedReceiver<(TurnOutcome, u64)>,
    store: &HistoryStore,
    config: &mut Config,
) -> Result<(), Box<dyn Error>> {
    'main: loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break 'main Ok(());
                    }
                    KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        toggle_theme(app, config);
                    }
                    KeyCode::Enter => {
                        if let Some((prompt, turn_id)) = app.submit() {
                            persist(app, store);
                            service.spawn_request(RequestParams {
                                client: client.clone(),
                                endpoint: INFER_ENDPOINT.to_string(),
                                prompt,
                                turn_id,
                            });
                        }
                    }
                    KeyCode::Up => app.scroll_up(1),
                    KeyCode::Down => app.scroll_down(1, transcript_height(terminal)),
                    KeyCode::PageUp => app.scroll_up(10),
                    KeyCode::PageDown => app.scroll_down(10, transcript_height(terminal)),
                    _ => {
                        // Text edits are ignored while a turn is in
                        // flight; the pending prompt stays visible until
                        // the turn settles.
                        if app.turn.is_idle() {
                            app.input.input(tui_textarea::Input::from(key));
                        }
                    }
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => app.scroll_up(3),
                    MouseEventKind::ScrollDown => app.scroll_down(3, transcript_height(terminal)),
                    _ => {}
                },
                _ => {}
            }
        }

        // Apply settled turns - drain everything that arrived this tick.
        while let Ok((outcome, turn_id)) = rx.try_recv() {
            if app.settle(turn_id, outcome) {
                persist(app, store);
            }
        }
    }
}

fn toggle_theme(app: &mut App, config: &mut Config) {
    app.toggle_theme();
    config.theme = Some(app.theme_name.clone());
    if let Err(err) = config.save() {
        tracing::warn!(error = %err, "failed to save theme preference");
        app.status = Some("Could not save theme preference".to_string());
    }
}

/// Transcript rows currently visible: frame height minus the input area
/// (3 rows) and the title row.
fn transcript_height(terminal: &ChatTerminal) -> u16 {
    let height = terminal.size().map(|size| size.height).unwrap_or_default();
    height.saturating_sub(3).saturating_sub(1)
}

fn persist(app: &mut App, store: &HistoryStore) {
    if let Err(err) = store.save(app.conversation.messages()) {
        tracing::warn!(error = %err, "failed to persist chat history");
        app.status = Some("Could not save chat history".to_string());
    }
}
