//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{
        Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Row, Table,
        TableState, Wrap,
    },
};

use crate::app::{App, Mode};
use crate::config::UiSettings;

fn controls_text(mode: Mode) -> &'static str {
    match mode {
        Mode::Browse => "[j/k] move | [enter] open | [h/backspace] parent dir | [g/G] top/bottom | [q] quit",
        Mode::ViewMetadata => "[j/k] move | [enter] edit field | [g/G] top/bottom | [esc] files | [q] quit",
        Mode::EditField => "[enter] save | [esc] cancel",
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn draw_browser(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .browser
        .entries()
        .iter()
        .map(|entry| {
            if entry.is_dir {
                ListItem::new(format!("{}/", entry.name))
            } else if entry.is_audio {
                ListItem::new(entry.name.clone())
            } else {
                ListItem::new(entry.name.clone())
                    .style(Style::default().add_modifier(Modifier::DIM))
            }
        })
        .collect();

    let title = format!(" {} ", app.browser.current_dir().display());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.browser.entries().is_empty() {
        state.select(Some(app.browser.selected_index()));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_metadata_table(frame: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|(key, value)| Row::new(vec![key.clone(), value.clone()]))
        .collect();

    let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(24)])
        .header(Row::new(vec!["Property", "Value"]).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(Block::default().borders(Borders::ALL).title(" metadata "))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    // While editing, keep the highlight pinned to the row being edited.
    let selected = match app.mode {
        Mode::EditField => app.editing_row,
        _ => app.cursor,
    };
    let mut state = TableState::default();
    if !app.rows.is_empty() {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_edit_popup(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_sized(64, 7, area);
    frame.render_widget(Clear, popup_area);

    let text = format!("{}\n\n{}█", app.editing_key, app.edit_buffer);
    let editor = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" edit ")
                .padding(Padding {
                    left: 1,
                    right: 1,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(editor, popup_area);
}

/// Render the entire UI into the provided `frame` using `app` state.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" forte ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        let mode_text = match app.mode {
            Mode::Browse => "MODE: Files".to_string(),
            Mode::ViewMetadata => "MODE: Metadata".to_string(),
            Mode::EditField => format!("MODE: Editing {}", app.editing_key),
        };
        parts.push(mode_text);

        if let Some(path) = &app.selected_file {
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                parts.push(format!("File: {name}"));
            }
        }

        if let Some(msg) = &app.status {
            parts.push(msg.clone());
        }

        if !app.diag.is_empty() {
            parts.push(format!("warnings: {}", app.diag.len()));
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Main area
    match app.mode {
        Mode::Browse => draw_browser(frame, app, chunks[2]),
        Mode::ViewMetadata => draw_metadata_table(frame, app, chunks[2]),
        Mode::EditField => {
            draw_metadata_table(frame, app, chunks[2]);
            draw_edit_popup(frame, app, chunks[2]);
        }
    }

    // Controls footer
    let footer = Paragraph::new(controls_text(app.mode))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
