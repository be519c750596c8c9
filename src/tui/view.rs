use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Line, Modifier, Span, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::i18n;
use super::model::{Palette, Snapshot};
use super::state::UiState;

mod modals;
mod pages;
mod widgets;

const TOAST_TTL: Duration = Duration::from_secs(2);

pub(in crate::tui) fn render_app(
    f: &mut Frame<'_>,
    p: Palette,
    ui: &mut UiState,
    snapshot: &Snapshot,
    title: &str,
) {
    f.render_widget(widgets::BackgroundWidget { p }, f.area());

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, p, ui, snapshot, title, outer[0]);
    pages::render_body(f, p, ui, snapshot, outer[1]);
    render_footer(f, p, snapshot, outer[2]);

    if snapshot.language_menu_open {
        modals::render_language_modal(f, p, ui, snapshot);
    }
}

fn render_header(
    f: &mut Frame<'_>,
    p: Palette,
    ui: &mut UiState,
    snapshot: &Snapshot,
    title: &str,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(p.border))
        .style(Style::default().bg(p.panel));

    let mut spans = vec![
        Span::styled(
            format!(" {title} "),
            Style::default().fg(p.focus).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}]", snapshot.indicator),
            Style::default().fg(p.text),
        ),
    ];
    if let Some(section) = snapshot.section.as_ref() {
        spans.push(Span::styled("  ›  ", Style::default().fg(p.muted)));
        spans.push(Span::styled(section.title.clone(), Style::default().fg(p.text)));
    }
    if let Some(transition) = snapshot.transition.as_deref() {
        spans.push(Span::styled(
            format!("  {transition}"),
            Style::default().fg(p.warn),
        ));
    }

    if let Some((msg, at)) = ui.toast.as_ref() {
        if at.elapsed() < TOAST_TTL {
            spans.push(Span::styled(format!("  {msg}"), Style::default().fg(p.good)));
        } else {
            ui.toast = None;
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_footer(f: &mut Frame<'_>, p: Palette, snapshot: &Snapshot, area: Rect) {
    let hints = Paragraph::new(Line::from(Span::styled(
        i18n::footer_hints(snapshot.language),
        Style::default().fg(p.muted),
    )))
    .style(Style::default().bg(p.bg));
    f.render_widget(hints, area);
}
