use ratatui::Frame;
use ratatui::layout::{Margin, Rect};

use crate::tui::model::{Palette, Snapshot};
use crate::tui::state::UiState;

mod home;
mod section;

pub(super) fn render_body(
    f: &mut Frame<'_>,
    p: Palette,
    ui: &mut UiState,
    snapshot: &Snapshot,
    area: Rect,
) {
    let area = area.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });

    match snapshot.section.as_ref() {
        None => home::render_home_page(f, p, ui, snapshot, area),
        Some(view) => section::render_section_page(f, p, ui, snapshot, view, area),
    }
}
