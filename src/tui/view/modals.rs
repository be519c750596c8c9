use ratatui::Frame;
use ratatui::prelude::{Modifier, Span, Style};
use ratatui::widgets::{Block, Borders, Clear, HighlightSpacing, List, ListItem};

use crate::tui::i18n;
use crate::tui::model::{Palette, Snapshot};
use crate::tui::state::UiState;

use super::widgets::centered_rect;

pub(super) fn render_language_modal(
    f: &mut Frame<'_>,
    p: Palette,
    ui: &mut UiState,
    snapshot: &Snapshot,
) {
    let area = centered_rect(40, 50, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(
            i18n::language_title(snapshot.language),
            Style::default().fg(p.text).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.focus))
        .style(Style::default().bg(p.panel));

    // The active language stays listed, greyed out like a disabled option.
    let items = snapshot
        .languages
        .iter()
        .map(|l| {
            let style = if l.active {
                Style::default().fg(p.muted)
            } else {
                Style::default().fg(p.text)
            };
            let marker = if l.active { "✓ " } else { "  " };
            ListItem::new(Span::styled(format!("{marker}{}", l.label), style))
        })
        .collect::<Vec<_>>();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(p.focus).add_modifier(Modifier::BOLD))
        .highlight_symbol("› ")
        .highlight_spacing(HighlightSpacing::Always);
    f.render_stateful_widget(list, area, &mut ui.targets);
}
