//! Two-list technology picker: catalog on the left, picks on the right.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::loadable::Loadable;
use crate::screens::SelectorPane;
use crate::selector::TechnologySelector;
use crate::tui::theme::*;

pub fn render_technology_selector(
    frame: &mut Frame,
    area: Rect,
    selector: &TechnologySelector,
    pane: SelectorPane,
    focused: bool,
    spinner: &str,
) {
    let layout = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);
    let lists = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[0]);

    let border = |active: bool| {
        if focused && active {
            Style::new().fg(LOGO_LIGHT_BLUE)
        } else {
            Style::new().fg(TEXT_DIM)
        }
    };

    // Left: catalog
    let left = Block::default()
        .title(" Technologies ")
        .borders(Borders::ALL)
        .border_style(border(pane == SelectorPane::Candidates));
    match selector.catalog_state() {
        Loadable::Loading => {
            let line = Line::styled(
                format!("{} Loading technologies...", spinner),
                Style::new().fg(LOGO_MINT),
            );
            frame.render_widget(Paragraph::new(line).block(left), lists[0]);
        }
        Loadable::Failed(_) => {
            let line = Line::styled("Technologies unavailable", Style::new().fg(TEXT_DIM));
            frame.render_widget(Paragraph::new(line).block(left), lists[0]);
        }
        _ => {
            let items: Vec<ListItem> = selector
                .options()
                .iter()
                .map(|option| {
                    let style = if selector.is_selected(&option.value) {
                        Style::new().fg(TEXT_DIM)
                    } else {
                        Style::new().fg(TEXT_WHITE)
                    };
                    ListItem::new(Line::styled(option.label.clone(), style))
                })
                .collect();
            let mut state = ListState::default().with_selected(selector.candidate_index());
            frame.render_stateful_widget(highlighted_list(items, left), lists[0], &mut state);
        }
    }

    // Right: selection, labels resolved through the catalog
    let items: Vec<ListItem> = selector
        .selected()
        .iter()
        .map(|id| {
            let label = selector.label_for(id).unwrap_or(id.as_str()).to_string();
            ListItem::new(Line::styled(label, Style::new().fg(TEXT_WHITE)))
        })
        .collect();
    let right = Block::default()
        .title(format!(" Selected ({}) ", selector.selected().len()))
        .borders(Borders::ALL)
        .border_style(border(pane == SelectorPane::Selected));
    let mut state = ListState::default().with_selected(selector.selection_index());
    frame.render_stateful_widget(highlighted_list(items, right), lists[1], &mut state);

    if let Some(notice) = selector.notice() {
        frame.render_widget(
            Paragraph::new(Line::styled(notice, Style::new().fg(LOGO_GOLD))),
            layout[1],
        );
    }
}

fn highlighted_list<'a>(items: Vec<ListItem<'a>>, block: Block<'a>) -> List<'a> {
    List::new(items)
        .block(block)
        .highlight_style(Style::new().fg(TEXT_WHITE).bg(HIGHLIGHT_BG).bold())
        .highlight_symbol("> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Technology;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn selector_with(count: i64) -> TechnologySelector {
        let catalog = (1..=count)
            .map(|id| Technology {
                id: Some(id),
                tech_id: Some(id),
                tech_description: format!("Tech {:02}", id),
            })
            .collect();
        let mut selector = TechnologySelector::new(|_| {});
        selector.begin_loading();
        selector.apply_catalog(Ok(catalog));
        selector
    }

    fn render_to_string(selector: &TechnologySelector, pane: SelectorPane) -> String {
        let (width, height) = (60, 8);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| render_technology_selector(f, f.area(), selector, pane, true, ""))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..height {
            for x in 0..width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_highlighted_candidate_stays_visible() {
        let mut selector = selector_with(20);
        for _ in 0..15 {
            selector.candidate_next();
        }
        assert_eq!(selector.candidate(), Some("15"));

        let screen = render_to_string(&selector, SelectorPane::Candidates);
        assert!(screen.contains("> Tech 15"));
        assert!(!screen.contains("Tech 01"));
    }

    #[test]
    fn test_highlighted_selection_stays_visible() {
        let mut selector = selector_with(12);
        for id in 1..=12 {
            selector.select_candidate(&id.to_string());
            selector.commit_selection();
        }
        selector.select_selected("11");

        let screen = render_to_string(&selector, SelectorPane::Selected);
        assert!(screen.contains("Selected (12)"));
        assert!(screen.contains("> Tech 11"));
    }
}
