use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::application::{FetchTicket, RefreshScheduler, RepoTable, SortOrder};
use crate::domain::{aggregate, ApiReply, DomainError, Snapshot, StatusLine};

/// Completion messages delivered back to the view loop.
#[derive(Debug)]
pub enum AppEvent {
    StateFetched {
        ticket: FetchTicket,
        result: Result<Snapshot, DomainError>,
    },
    RemoveFinished {
        id: String,
        result: Result<ApiReply, DomainError>,
    },
}

/// Requests the view loop must carry out on the app's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Remove(String),
}

/// State of the live view. The table is written only when a fetch completes
/// successfully and is the newest one seen.
pub struct App {
    table: RepoTable,
    scheduler: RefreshScheduler,
    status_line: Option<StatusLine>,
    backend_label: String,
    removals_in_flight: usize,
    pub show_detail: bool,
    pub show_help: bool,
    should_quit: bool,
}

impl App {
    pub fn new(backend_label: impl Into<String>, order: SortOrder) -> Self {
        Self {
            table: RepoTable::new(order),
            scheduler: RefreshScheduler::new(),
            status_line: None,
            backend_label: backend_label.into(),
            removals_in_flight: 0,
            show_detail: false,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn table(&self) -> &RepoTable {
        &self.table
    }

    pub fn status_line(&self) -> Option<&StatusLine> {
        self.status_line.as_ref()
    }

    pub fn backend_label(&self) -> &str {
        &self.backend_label
    }

    pub fn is_fetching(&self) -> bool {
        self.scheduler.is_fetching()
    }

    pub fn removals_in_flight(&self) -> usize {
        self.removals_in_flight
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Starts a refresh unless one is already outstanding.
    pub fn begin_refresh(&mut self) -> Option<FetchTicket> {
        self.scheduler.begin()
    }

    pub fn note_removal_started(&mut self) {
        self.removals_in_flight += 1;
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::StateFetched { ticket, result } => {
                self.status_line = Some(StatusLine::for_state(&result));
                if self.scheduler.complete(ticket, result.is_ok()) {
                    if let Ok(snapshot) = result {
                        self.table.replace(aggregate(&snapshot));
                        debug!(
                            "Rendered snapshot #{} with {} rows",
                            ticket.sequence(),
                            self.table.len()
                        );
                    }
                }
            }
            AppEvent::RemoveFinished { id, result } => {
                self.removals_in_flight = self.removals_in_flight.saturating_sub(1);
                debug!("Removal of {} finished (ok={})", id, result.is_ok());
                self.status_line = Some(StatusLine::for_remove(&result));
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.table.select_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.table.select_previous();
                None
            }
            KeyCode::Enter => {
                self.show_detail = !self.show_detail;
                None
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
                None
            }
            KeyCode::Char('s') => {
                self.table.set_order(self.table.order().toggled());
                None
            }
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('d') | KeyCode::Delete => self.table.removal_target().map(Action::Remove),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Chunk, FileState, FileVersion, RepositoryState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn snapshot(ids: &[&str]) -> Snapshot {
        Snapshot::new(
            ids.iter()
                .map(|id| {
                    RepositoryState::new(*id, format!("repo-{id}"), "share", "/r").with_file(
                        FileState::new()
                            .with_version(FileVersion::new(vec![Chunk::saved(1)])),
                    )
                })
                .collect(),
        )
    }

    fn fetched(app: &mut App, result: Result<Snapshot, DomainError>) {
        let ticket = app.begin_refresh().unwrap();
        app.apply_event(AppEvent::StateFetched { ticket, result });
    }

    fn row_ids(app: &App) -> Vec<String> {
        app.table().rows().iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_successful_fetch_renders_and_reports() {
        let mut app = App::new("test", SortOrder::Snapshot);
        fetched(&mut app, Ok(snapshot(&["r1", "r2"])));

        assert_eq!(row_ids(&app), vec!["r1", "r2"]);
        assert_eq!(app.status_line().unwrap().to_string(), "state: ok ()");
        assert!(!app.is_fetching());
    }

    #[test]
    fn test_failed_fetch_keeps_last_good_render() {
        let mut app = App::new("test", SortOrder::Snapshot);
        fetched(&mut app, Ok(snapshot(&["r1"])));
        fetched(&mut app, Err(DomainError::fetch("connection refused")));

        assert_eq!(row_ids(&app), vec!["r1"]);
        assert_eq!(
            app.status_line().unwrap().to_string(),
            "state: error (connection refused)"
        );
        assert!(app.begin_refresh().is_some());
    }

    #[test]
    fn test_schema_mismatch_keeps_last_good_render() {
        let mut app = App::new("test", SortOrder::Snapshot);
        fetched(&mut app, Ok(snapshot(&["r1", "r2"])));
        let generation = app.table().generation();

        fetched(&mut app, Snapshot::decode(r#"{"status": "ok", "repos": 5}"#));

        assert_eq!(row_ids(&app), vec!["r1", "r2"]);
        assert_eq!(app.table().generation(), generation);
        let status = app.status_line().unwrap();
        assert!(status.is_error());
        assert!(status.to_string().starts_with("state: error ("));
    }

    #[test]
    fn test_backend_rejection_keeps_rows_and_shows_status() {
        let mut app = App::new("test", SortOrder::Snapshot);
        fetched(&mut app, Ok(snapshot(&["r1"])));

        fetched(
            &mut app,
            Snapshot::decode(r#"{"status": "busy", "message": "reindexing"}"#),
        );

        assert_eq!(row_ids(&app), vec!["r1"]);
        assert_eq!(
            app.status_line().unwrap().to_string(),
            "state: busy (reindexing)"
        );
    }

    #[test]
    fn test_failed_removal_only_touches_status_line() {
        let mut app = App::new("test", SortOrder::Snapshot);
        fetched(&mut app, Ok(snapshot(&["r1"])));
        let generation = app.table().generation();

        let action = app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(action, Some(Action::Remove("r1".to_string())));
        app.note_removal_started();
        app.apply_event(AppEvent::RemoveFinished {
            id: "r1".to_string(),
            result: Err(DomainError::remove("Can't find that repo")),
        });

        assert_eq!(row_ids(&app), vec!["r1"]);
        assert_eq!(app.table().generation(), generation);
        assert_eq!(
            app.status_line().unwrap().to_string(),
            "remove: error (Can't find that repo)"
        );
        assert_eq!(app.removals_in_flight(), 0);
    }

    #[test]
    fn test_successful_removal_waits_for_next_snapshot() {
        let mut app = App::new("test", SortOrder::Snapshot);
        fetched(&mut app, Ok(snapshot(&["r1", "r2"])));

        app.apply_event(AppEvent::RemoveFinished {
            id: "r1".to_string(),
            result: Ok(ApiReply::ok("Removed repo-r1")),
        });
        assert_eq!(row_ids(&app), vec!["r1", "r2"]);

        fetched(&mut app, Ok(snapshot(&["r2"])));
        assert_eq!(row_ids(&app), vec!["r2"]);
    }

    #[test]
    fn test_refresh_guard_while_fetching() {
        let mut app = App::new("test", SortOrder::Snapshot);
        let ticket = app.begin_refresh().unwrap();

        assert!(app.is_fetching());
        assert!(app.begin_refresh().is_none());

        app.apply_event(AppEvent::StateFetched {
            ticket,
            result: Ok(snapshot(&["r1"])),
        });
        assert!(!app.is_fetching());
    }

    #[test]
    fn test_keys() {
        let mut app = App::new("test", SortOrder::Snapshot);
        assert_eq!(app.handle_key(key(KeyCode::Char('d'))), None);
        assert_eq!(app.handle_key(key(KeyCode::Char('r'))), Some(Action::Refresh));

        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.table().order(), SortOrder::Name);

        app.handle_key(key(KeyCode::Char('?')));
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit());

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }
}
