//! Interactive terminal browser over a [`MenuPage`].

mod i18n;
mod input;
mod model;
mod state;
mod terminal;
mod view;

use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::page::MenuPage;

use self::model::{Palette, build_snapshot};
use self::state::UiState;
use self::terminal::TerminalGuard;

/// Run until the user quits or Ctrl-C arrives.
pub async fn run_browser(mut page: MenuPage, title: &str) -> anyhow::Result<()> {
    let frame_ms = std::env::var("MENU_CARD_TUI_FRAME_MS")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(40)
        .clamp(10, 500);

    let term_guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut ui = UiState::default();
    let palette = Palette::default();

    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(frame_ms));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut ctrl_c = Box::pin(tokio::signal::ctrl_c());

    info!("browser started in {}", page.language());
    let mut snapshot = build_snapshot(&page);
    ui.clamp_selection(&snapshot);

    let mut should_redraw = true;
    loop {
        if should_redraw {
            terminal.draw(|f| view::render_app(f, palette, &mut ui, &snapshot, title))?;
            should_redraw = false;
        }

        if ui.should_exit {
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {
                let busy = page.navigation().is_transitioning();
                page.tick(ui.now_ms());
                if busy || ui.toast.is_some() {
                    snapshot = build_snapshot(&page);
                    ui.clamp_selection(&snapshot);
                    should_redraw = true;
                }
            }
            _ = &mut ctrl_c => {
                ui.should_exit = true;
            }
            maybe_event = events.next() => {
                let Some(Ok(event)) = maybe_event else { continue; };
                match event {
                    Event::Key(key) if input::should_accept_key_event(&key) => {
                        if input::handle_key_event(&mut page, &mut ui, &snapshot, key) {
                            snapshot = build_snapshot(&page);
                            ui.clamp_selection(&snapshot);
                            should_redraw = true;
                        }
                    }
                    Event::Resize(_, _) => {
                        should_redraw = true;
                    }
                    _ => {}
                }
            }
        }
    }

    info!("browser closed in {}", page.language());
    terminal.show_cursor()?;
    term_guard.leave()
}
