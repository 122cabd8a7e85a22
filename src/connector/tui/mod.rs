//! Live terminal view.
//!
//! One `select!` loop owns the [`App`]: timer ticks start fetches, requests run as
//! spawned tasks and report back over a channel, key presses map to actions.

pub mod app;
pub mod ui;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::application::{
    FetchSnapshotUseCase, RemoveRepositoryUseCase, SortOrder, SyncBackend, REFRESH_INTERVAL,
};

pub use app::{Action, App, AppEvent};

const EVENT_QUEUE_CAPACITY: usize = 64;

/// Runs the live view until the operator quits.
pub async fn run(backend: Arc<dyn SyncBackend>, order: SortOrder) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, backend, order).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    undo_on_error(enter_alternate_screen, || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })
}

/// Runs `step`; if it fails, runs `undo` before handing back the error.
fn undo_on_error<T>(step: impl FnOnce() -> Result<T>, undo: impl FnOnce()) -> Result<T> {
    step().inspect_err(|_| undo())
}

fn enter_alternate_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    backend: Arc<dyn SyncBackend>,
    order: SortOrder,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    let mut app = App::new(backend.describe(), order);
    let mut events = EventStream::new();

    // The first tick fires immediately and doubles as the startup fetch.
    let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        "Watching {} every {:?}",
        backend.describe(),
        REFRESH_INTERVAL
    );

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                start_refresh(&mut app, &backend, &tx);
            }
            Some(event) = rx.recv() => {
                app.apply_event(event);
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match app.handle_key(key) {
                            Some(Action::Refresh) => start_refresh(&mut app, &backend, &tx),
                            Some(Action::Remove(id)) => start_removal(&mut app, &backend, &tx, id),
                            None => {}
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("Terminal event stream failed: {}", e);
                        return Err(e.into());
                    }
                    None => break,
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

fn start_refresh(app: &mut App, backend: &Arc<dyn SyncBackend>, tx: &mpsc::Sender<AppEvent>) {
    let Some(ticket) = app.begin_refresh() else {
        return;
    };

    let use_case = FetchSnapshotUseCase::new(Arc::clone(backend));
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = use_case.execute().await;
        let _ = tx.send(AppEvent::StateFetched { ticket, result }).await;
    });
}

fn start_removal(
    app: &mut App,
    backend: &Arc<dyn SyncBackend>,
    tx: &mpsc::Sender<AppEvent>,
    id: String,
) {
    app.note_removal_started();

    let use_case = RemoveRepositoryUseCase::new(Arc::clone(backend));
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = use_case.execute(&id).await;
        let _ = tx.send(AppEvent::RemoveFinished { id, result }).await;
    });
}
