use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::navigation::SwipeDirection;
use crate::page::{EventOutcome, MenuPage, PageEvent};
use crate::switcher::SwitchOutcome;

use super::model::Snapshot;
use super::state::UiState;

const SCROLL_STEP: u16 = 4;

pub(in crate::tui) fn should_accept_key_event(event: &KeyEvent) -> bool {
    matches!(event.kind, KeyEventKind::Press | KeyEventKind::Repeat)
}

/// Apply one key to the page; returns true when the screen needs a redraw.
pub(in crate::tui) fn handle_key_event(
    page: &mut MenuPage,
    ui: &mut UiState,
    snapshot: &Snapshot,
    key: KeyEvent,
) -> bool {
    let now = ui.now_ms();
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        ui.should_exit = true;
        return true;
    }

    let targets = snapshot.targets();
    match key.code {
        KeyCode::Char('q') => {
            ui.should_exit = true;
            true
        }
        KeyCode::Esc => {
            if snapshot.language_menu_open {
                page.dispatch(PageEvent::ToggleLanguageMenu, now);
            } else if snapshot.section.is_some() {
                page.dispatch(PageEvent::Home, now);
            } else {
                ui.should_exit = true;
            }
            true
        }
        KeyCode::Char('l') => {
            page.dispatch(PageEvent::ToggleLanguageMenu, now);
            if page.is_language_menu_open() {
                ui.selected = snapshot
                    .languages
                    .iter()
                    .position(|l| l.active)
                    .unwrap_or(0);
            }
            true
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
            ui.move_selection(-1, targets.len());
            true
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
            ui.move_selection(1, targets.len());
            true
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let Some(target) = targets.get(ui.selected) else {
                return false;
            };
            let outcome = page.click(target.node, now);
            debug!("activated '{}': {:?}", target.label, outcome);
            if let Some(EventOutcome::Language(SwitchOutcome::Switched)) = outcome {
                let lang = page.language();
                ui.toast = Some((
                    format!("{} {}", lang.flag(), lang.native_name()),
                    Instant::now(),
                ));
            }
            true
        }
        // Arrow keys follow the page: → brings in the next section like a
        // swipe to the left.
        KeyCode::Right | KeyCode::Char('n') => {
            page.dispatch(PageEvent::Swipe(SwipeDirection::Left), now);
            true
        }
        KeyCode::Left | KeyCode::Char('p') => {
            page.dispatch(PageEvent::Swipe(SwipeDirection::Right), now);
            true
        }
        KeyCode::Char('h') | KeyCode::Home => {
            page.dispatch(PageEvent::Home, now);
            true
        }
        KeyCode::PageDown => {
            ui.scroll = ui.scroll.saturating_add(SCROLL_STEP);
            true
        }
        KeyCode::PageUp => {
            ui.scroll = ui.scroll.saturating_sub(SCROLL_STEP);
            true
        }
        KeyCode::Char(c @ '1'..='9') if snapshot.section.is_none() && !snapshot.language_menu_open => {
            let idx = c as usize - '1' as usize;
            let Some(target) = snapshot.home.get(idx) else {
                return false;
            };
            page.click(target.node, now);
            true
        }
        _ => false,
    }
}
