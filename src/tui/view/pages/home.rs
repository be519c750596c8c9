use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Line, Modifier, Span, Style};
use ratatui::widgets::{Block, Borders, HighlightSpacing, List, ListItem};

use crate::tui::i18n;
use crate::tui::model::{Palette, Snapshot};
use crate::tui::state::UiState;

pub(super) fn render_home_page(
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

    let items = snapshot
        .home
        .iter()
        .enumerate()
        .map(|(i, t)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", i + 1), Style::default().fg(p.muted)),
                Span::styled(t.label.clone(), Style::default().fg(p.text)),
            ]))
        })
        .collect::<Vec<_>>();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(p.focus).add_modifier(Modifier::BOLD))
        .highlight_symbol("› ")
        .highlight_spacing(HighlightSpacing::Always);
    if snapshot.language_menu_open {
        // Selection belongs to the dropdown while it is open.
        f.render_widget(list, area);
    } else {
        f.render_stateful_widget(list, area, &mut ui.targets);
    }
}
