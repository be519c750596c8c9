use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Line, Modifier, Span, Style};
use ratatui::widgets::{Block, Borders, HighlightSpacing, List, ListItem, Paragraph, Wrap};

use crate::tui::i18n;
use crate::tui::model::{Palette, SectionView, Snapshot, pad_to};
use crate::tui::state::UiState;

const NAME_WIDTH: usize = 34;

pub(super) fn render_section_page(
    f: &mut Frame<'_>,
    p: Palette,
    ui: &mut UiState,
    snapshot: &Snapshot,
    view: &SectionView,
    area: Rect,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    render_items(f, p, ui, snapshot, view, columns[0]);
    render_navigation(f, p, ui, snapshot, columns[1]);
}

fn render_items(
    f: &mut Frame<'_>,
    p: Palette,
    ui: &mut UiState,
    snapshot: &Snapshot,
    view: &SectionView,
    area: Rect,
) {
    let border = if view.leaving { p.muted } else { p.border };
    let block = Block::default()
        .title(Span::styled(
            view.title.clone(),
            Style::default().fg(p.text).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(p.panel));

    let mut lines = Vec::new();
    if view.items.is_empty() {
        lines.push(Line::from(Span::styled(
            i18n::empty_section(snapshot.language),
            Style::default().fg(p.muted),
        )));
    }
    for item in &view.items {
        lines.push(Line::from(vec![
            Span::styled(
                pad_to(&item.name, NAME_WIDTH),
                Style::default().fg(p.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(item.price.clone(), Style::default().fg(p.focus)),
        ]));
        if let Some(desc) = item.description.as_deref() {
            lines.push(Line::from(Span::styled(
                format!("  {desc}"),
                Style::default().fg(p.muted),
            )));
        }
        if !item.badges.is_empty() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}: ", i18n::allergens_label(snapshot.language)),
                    Style::default().fg(p.muted),
                ),
                Span::styled(item.badges.join(" · "), Style::default().fg(p.accent)),
            ]));
        }
        lines.push(Line::from(""));
    }

    let max_scroll = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_sub(1);
    ui.scroll = ui.scroll.min(max_scroll);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((ui.scroll, 0));
    f.render_widget(paragraph, area);
}

fn render_navigation(
    f: &mut Frame<'_>,
    p: Palette,
    ui: &mut UiState,
    snapshot: &Snapshot,
    area: Rect,
) {
    let block = Block::default()
        .title(Span::styled(
            i18n::sections_title(snapshot.language),
            Style::default().fg(p.text).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.border))
        .style(Style::default().bg(p.panel));

    let pager_len = snapshot.pager.len();
    let items = snapshot
        .pager
        .iter()
        .chain(snapshot.secondary.iter())
        .chain(snapshot.home_button.iter())
        .enumerate()
        .map(|(i, t)| {
            let color = if i < pager_len { p.accent } else { p.text };
            ListItem::new(Span::styled(t.label.clone(), Style::default().fg(color)))
        })
        .collect::<Vec<_>>();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(p.focus).add_modifier(Modifier::BOLD))
        .highlight_symbol("› ")
        .highlight_spacing(HighlightSpacing::Always);
    if snapshot.language_menu_open {
        f.render_widget(list, area);
    } else {
        f.render_stateful_widget(list, area, &mut ui.targets);
    }
}
