use std::time::Instant;

use ratatui::widgets::ListState;

use super::model::Snapshot;

#[derive(Debug)]
pub(in crate::tui) struct UiState {
    pub(in crate::tui) started: Instant,
    pub(in crate::tui) selected: usize,
    pub(in crate::tui) targets: ListState,
    /// First item row of the open section.
    pub(in crate::tui) scroll: u16,
    pub(in crate::tui) toast: Option<(String, Instant)>,
    pub(in crate::tui) should_exit: bool,
    /// Section on screen at the last draw; a change resets scroll and focus.
    pub(in crate::tui) last_section: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            started: Instant::now(),
            selected: 0,
            targets: ListState::default(),
            scroll: 0,
            toast: None,
            should_exit: false,
            last_section: None,
        }
    }
}

impl UiState {
    /// Milliseconds since the browser started; the page clock.
    pub(in crate::tui) fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub(in crate::tui) fn clamp_selection(&mut self, snapshot: &Snapshot) {
        let section = snapshot.section.as_ref().map(|s| s.id.clone());
        if section != self.last_section {
            self.last_section = section;
            self.selected = 0;
            self.scroll = 0;
        }

        let len = snapshot.targets().len();
        if len == 0 {
            self.selected = 0;
            self.targets.select(None);
            return;
        }
        self.selected = self.selected.min(len - 1);
        self.targets.select(Some(self.selected));
    }

    pub(in crate::tui) fn move_selection(&mut self, delta: i32, len: usize) {
        if len == 0 {
            self.targets.select(None);
            return;
        }
        self.selected = if delta.is_negative() {
            self.selected.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (self.selected + delta as usize).min(len - 1)
        };
        self.targets.select(Some(self.selected));
    }
}
