use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::domain::{format_bytes, Completion, RepoView};

use super::app::App;

const BAR_WIDTH: usize = 10;

pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(f, app, layout[0]);

    if app.show_help || app.show_detail {
        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(layout[1]);
        render_table(f, app, main[0]);
        if app.show_help {
            render_help(f, main[1]);
        } else {
            render_details(f, app, main[1]);
        }
    } else {
        render_table(f, app, layout[1]);
    }

    render_status(f, app, layout[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "chunkwatch",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" @ {}", app.backend_label())),
        Span::styled(
            format!(
                "  sort: {}  snapshots: {}",
                app.table().order().as_str(),
                app.table().generation()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if app.is_fetching() {
        spans.push(Span::styled("  refreshing", Color::Yellow));
    }
    if app.removals_in_flight() > 0 {
        spans.push(Span::styled(
            format!("  removals pending: {}", app.removals_in_flight()),
            Color::Yellow,
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Repositories")
        .border_style(Style::default().fg(Color::Cyan));

    let table = app.table();
    if table.is_empty() {
        let message = if table.generation() == 0 {
            "Waiting for the first snapshot..."
        } else {
            "No repositories tracked."
        };
        let p = Paragraph::new(Line::from(Span::styled(message, Color::Yellow))).block(block);
        f.render_widget(p, area);
        return;
    }

    let selected = table.selected();
    let rows: Vec<Row> = table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, view)| repo_row(view, selected == Some(i)))
        .collect();

    let widget = Table::new(
        rows,
        [
            Constraint::Percentage(22),
            Constraint::Percentage(26),
            Constraint::Percentage(22),
            Constraint::Length((BAR_WIDTH + 10) as u16),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Repository", "Root", "Id", "Progress", ""])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = TableState::default().with_selected(selected);
    f.render_stateful_widget(widget, area, &mut state);
}

fn repo_row(view: &RepoView, selected: bool) -> Row<'static> {
    let progress_style = if view.completion.is_complete() {
        Style::default().fg(Color::Green)
    } else if view.completion == Completion::NoData {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let action = if selected { "[d]remove" } else { "" };

    Row::new(vec![
        Cell::from(view.label()),
        Cell::from(view.root.clone()),
        Cell::from(view.id.clone()),
        Cell::from(progress_cell(view.completion)).style(progress_style),
        Cell::from(action).style(Style::default().fg(Color::Red)),
    ])
}

/// Text gauge such as `#####-----  50%`, or the no-data placeholder.
pub fn progress_cell(completion: Completion) -> String {
    match completion {
        Completion::NoData => completion.to_string(),
        Completion::Percent(p) => {
            let filled = usize::from(p) * BAR_WIDTH / 100;
            format!(
                "{}{} {:>4}",
                "#".repeat(filled),
                "-".repeat(BAR_WIDTH - filled),
                completion.to_string()
            )
        }
    }
}

fn render_details(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Files (latest version)")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(view) = app.table().selected_row() else {
        f.render_widget(Paragraph::new("No repository selected."), inner);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            view.label(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} of {} saved, {} pending",
            format_bytes(view.done_bytes),
            format_bytes(view.total_bytes()),
            format_bytes(view.missing_bytes)
        )),
        Line::from(format!(
            "{}/{} files complete",
            view.files_complete, view.files_total
        )),
        Line::from(""),
    ];

    for file in &view.files {
        let mut spans = vec![
            Span::styled(format!("{:>8} ", file.completion.to_string()), Color::Cyan),
            Span::raw(file.path.clone()),
            Span::styled(
                format!(
                    "  {} / {}  v{}",
                    format_bytes(file.done_bytes),
                    format_bytes(file.done_bytes.saturating_add(file.missing_bytes)),
                    file.versions
                ),
                Color::DarkGray,
            ),
        ];
        if let Some(timestamp) = file.timestamp {
            spans.push(Span::styled(format!("  @{}", timestamp), Color::DarkGray));
        }
        if file.deleted {
            spans.push(Span::styled("  deleted", Color::Red));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_help(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Help")
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let keys = [
        ("j / Down", "Next repository"),
        ("k / Up", "Previous repository"),
        ("Enter", "Toggle file details"),
        ("d", "Remove selected repository"),
        ("r", "Refresh now"),
        ("s", "Toggle name sort"),
        ("?", "Toggle help"),
        ("q / Esc", "Quit"),
    ];

    let mut text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    text.extend(keys.iter().map(|(key, what)| {
        Line::from(vec![
            Span::styled(format!("{:<10}", key), Color::Cyan),
            Span::raw(*what),
        ])
    }));
    text.push(Line::from(""));
    text.push(Line::from(
        "Removals show up once the next snapshot no longer lists the repository.",
    ));

    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Status");
    let line = match app.status_line() {
        Some(status) if status.is_error() => {
            Line::from(Span::styled(status.to_string(), Color::Red))
        }
        Some(status) => Line::from(status.to_string()),
        None => Line::from(Span::styled("no requests yet", Color::DarkGray)),
    };
    f.render_widget(Paragraph::new(line).block(block), area);
}
