//! Table plus form for the master-data collections.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};

use crate::app::App;
use crate::loadable::Loadable;
use crate::screens::{FieldType, MasterDataScreen, MasterPane, ResourceKind, cell_text};
use crate::tui::theme::*;

use super::field_line;

pub fn render_master_data(frame: &mut Frame, area: Rect, app: &App, kind: ResourceKind) {
    let Some(screen) = app.master(kind) else {
        return;
    };

    let form_height = screen.values.len() as u16 + 4;
    let layout =
        Layout::vertical([Constraint::Min(5), Constraint::Length(form_height)]).split(area);

    render_table(frame, layout[0], app, screen);
    render_form(frame, layout[1], screen);
}

fn render_table(frame: &mut Frame, area: Rect, app: &App, screen: &MasterDataScreen) {
    let focused = screen.pane == MasterPane::Table;
    let block = Block::default()
        .title(format!(" {} ", screen.kind.title()))
        .borders(Borders::ALL)
        .border_style(Style::new().fg(if focused { LOGO_LIGHT_BLUE } else { TEXT_DIM }));

    let rows = match &screen.rows {
        Loadable::Loading => {
            let line = Line::styled(
                format!("{} Loading {}...", app.spinner(), screen.kind.title().to_lowercase()),
                Style::new().fg(LOGO_MINT),
            );
            frame.render_widget(Paragraph::new(line).block(block), area);
            return;
        }
        Loadable::Loaded(rows) => rows,
        Loadable::Idle | Loadable::Failed(_) => {
            frame.render_widget(Paragraph::new("").block(block), area);
            return;
        }
    };

    let columns = screen.kind.columns();
    let header = Row::new(columns.iter().map(|def| def.label).collect::<Vec<_>>())
        .style(Style::new().fg(LOGO_LIGHT_BLUE).bold());
    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            Row::new(
                columns
                    .iter()
                    .map(|def| {
                        let text = cell_text(row.get(def.name));
                        match def.field_type {
                            FieldType::Lookup(_) => screen.lookup_label(&text),
                            _ => text,
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    let widths = vec![Constraint::Fill(1); columns.len()];

    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::new().bg(HIGHLIGHT_BG).fg(TEXT_WHITE).bold())
        .highlight_symbol("> ");

    let selected = if rows.is_empty() { None } else { Some(screen.selected) };
    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_form(frame: &mut Frame, area: Rect, screen: &MasterDataScreen) {
    let focused = screen.pane == MasterPane::Form;
    let title = if screen.is_updating() {
        format!(" Edit {} ", screen.kind.noun())
    } else {
        format!(" New {} ", screen.kind.noun())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::new().fg(if focused { LOGO_LIGHT_BLUE } else { TEXT_DIM }));

    let lines: Vec<Line> = screen
        .kind
        .fields()
        .iter()
        .zip(&screen.values)
        .enumerate()
        .map(|(i, (def, value))| {
            let is_focused = focused && i == screen.focus;
            let shown = match def.field_type {
                FieldType::YesNo if value.is_empty() => "[ ] (space to toggle)".to_string(),
                FieldType::YesNo => {
                    format!("[{}] {}", if value == "yes" { "x" } else { " " }, value)
                }
                FieldType::Lookup(source) => lookup_text(screen, source, value, is_focused),
                _ => value.clone(),
            };
            field_line(
                def.label,
                shown,
                is_focused,
                def.required,
                screen.is_locked(i),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Chosen parent record, or a hint while the list is loading or empty.
fn lookup_text(
    screen: &MasterDataScreen,
    source: ResourceKind,
    value: &str,
    focused: bool,
) -> String {
    let text = if !value.is_empty() {
        screen.lookup_label(value)
    } else if screen.lookup.is_loading() {
        "loading...".to_string()
    } else {
        format!("Select {}", source.noun())
    };
    if focused && !screen.is_locked(screen.focus) {
        format!("‹ {} ›", text)
    } else {
        text
    }
}
