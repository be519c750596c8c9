//! Which menu section is on screen, and how the page moves between them.
//!
//! A section change is a short-lived state machine:
//!
//! ```text
//! Idle ──navigate_to──▶ ExitingOld ──exit elapsed──▶ EnteringNew ──settle elapsed──▶ Idle
//!   └──────── (nothing visible) ─────────────────────▲
//! ```
//!
//! Time is passed in by the caller (`now_ms`) and deadlines are fired from
//! [`NavigationController::tick`]. A request that arrives while a transition
//! is in flight is queued; a newer request replaces the queued one, and it
//! starts as soon as the current transition settles. `show_home` drops both.

use std::time::Duration;

use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::i18n::{Language, SOURCE_LANGUAGE};
use crate::markup;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationState {
    Home,
    Viewing(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn exit_class(&self) -> &'static str {
        match self {
            Direction::Forward => "exit-forward",
            Direction::Backward => "exit-backward",
        }
    }

    pub fn enter_class(&self) -> &'static str {
        match self {
            Direction::Forward => "enter-forward",
            Direction::Backward => "enter-backward",
        }
    }

    /// Edge the outgoing page turns around.
    pub fn exit_pivot(&self) -> &'static str {
        match self {
            Direction::Forward => "left center",
            Direction::Backward => "right center",
        }
    }

    /// Edge the incoming page unfolds from.
    pub fn enter_pivot(&self) -> &'static str {
        match self {
            Direction::Forward => "right center",
            Direction::Backward => "left center",
        }
    }
}

/// Horizontal swipe, named by where the finger travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    ExitingOld {
        from: String,
        to: String,
        direction: Direction,
        until_ms: u64,
    },
    EnteringNew {
        to: String,
        direction: Direction,
        until_ms: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    /// Length of the exit animation; the target is revealed after it.
    pub exit: Duration,
    /// Delay before the pager of the revealed section is wired.
    pub settle: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            exit: Duration::from_millis(400),
            settle: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigateOutcome {
    Started(Direction),
    Queued,
    UnknownSection,
}

const TRANSITION_CLASSES: &[&str] = &[
    "exit-forward",
    "exit-backward",
    "enter-forward",
    "enter-backward",
];

#[derive(Debug, Clone)]
pub struct NavigationController {
    order: Vec<String>,
    state: NavigationState,
    phase: TransitionPhase,
    queued: Option<String>,
    timings: TransitionTimings,
}

impl NavigationController {
    pub fn new(order: Vec<String>, timings: TransitionTimings) -> Self {
        Self {
            order,
            state: NavigationState::Home,
            phase: TransitionPhase::Idle,
            queued: None,
            timings,
        }
    }

    /// Section order is the document order of `.menu-section` elements.
    pub fn from_document(doc: &Document, timings: TransitionTimings) -> Self {
        let order = doc
            .find_by_class(doc.root(), markup::MENU_SECTION)
            .into_iter()
            .filter_map(|s| doc.id(s).map(str::to_string))
            .collect();
        Self::new(order, timings)
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn phase(&self) -> &TransitionPhase {
        &self.phase
    }

    pub fn queued(&self) -> Option<&str> {
        self.queued.as_deref()
    }

    pub fn sections(&self) -> &[String] {
        &self.order
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }

    pub fn current_section(&self) -> Option<&str> {
        match &self.state {
            NavigationState::Home => None,
            NavigationState::Viewing(id) => Some(id),
        }
    }

    pub fn ordinal(&self, id: &str) -> Option<usize> {
        self.order.iter().position(|s| s == id)
    }

    /// Home counts as sitting before the first section.
    pub fn direction_to(&self, target: &str) -> Option<Direction> {
        let to = self.ordinal(target)?;
        let from = self.current_section().and_then(|id| self.ordinal(id));
        match from {
            Some(from) if to < from => Some(Direction::Backward),
            _ => Some(Direction::Forward),
        }
    }

    pub fn show_home(&mut self, doc: &mut Document) {
        for section in doc.find_by_class(doc.root(), markup::MENU_SECTION) {
            doc.set_style(section, "display", "none");
            clear_transition(doc, section);
        }
        if let Some(grid) = doc.get_element_by_id(markup::MAIN_BUTTONS_GRID) {
            doc.set_style(grid, "display", "flex");
        }
        if let Some(secondary) = doc.get_element_by_id(markup::SECONDARY_NAVIGATION) {
            doc.set_style(secondary, "display", "none");
        }
        scroll_container(doc);

        if self.is_transitioning() || self.queued.is_some() {
            debug!("home requested, dropping in-flight transition");
        }
        self.state = NavigationState::Home;
        self.phase = TransitionPhase::Idle;
        self.queued = None;
    }

    pub fn navigate_to(
        &mut self,
        doc: &mut Document,
        target: &str,
        lang: Language,
        now_ms: u64,
    ) -> NavigateOutcome {
        if self.ordinal(target).is_none() {
            debug!("ignoring navigation to unknown section '{}'", target);
            return NavigateOutcome::UnknownSection;
        }
        if self.is_transitioning() {
            debug!("transition in flight, queueing '{}'", target);
            self.queued = Some(target.to_string());
            return NavigateOutcome::Queued;
        }
        self.start(doc, target, lang, now_ms)
    }

    fn start(
        &mut self,
        doc: &mut Document,
        target: &str,
        lang: Language,
        now_ms: u64,
    ) -> NavigateOutcome {
        let direction = self.direction_to(target).unwrap_or(Direction::Forward);
        debug!("navigating to '{}' ({:?})", target, direction);

        if let Some(grid) = doc.get_element_by_id(markup::MAIN_BUTTONS_GRID) {
            doc.set_style(grid, "display", "none");
        }

        let visible = self.current_section().and_then(|id| {
            doc.get_element_by_id(id)
                .filter(|&el| doc.is_displayed(el))
                .map(|el| (id.to_string(), el))
        });

        match visible {
            Some((from, el)) => {
                clear_transition(doc, el);
                doc.add_class(el, direction.exit_class());
                doc.set_style(el, "transform-origin", direction.exit_pivot());
                self.phase = TransitionPhase::ExitingOld {
                    from,
                    to: target.to_string(),
                    direction,
                    until_ms: now_ms.saturating_add(duration_ms(self.timings.exit)),
                };
            }
            None => self.begin_entry(doc, target, direction, lang, now_ms),
        }
        NavigateOutcome::Started(direction)
    }

    fn begin_entry(
        &mut self,
        doc: &mut Document,
        target: &str,
        direction: Direction,
        lang: Language,
        now_ms: u64,
    ) {
        for section in doc.find_by_class(doc.root(), markup::MENU_SECTION) {
            doc.set_style(section, "display", "none");
            clear_transition(doc, section);
        }
        if let Some(el) = doc.get_element_by_id(target) {
            doc.set_style(el, "display", "block");
            doc.set_style(el, "opacity", "1");
            doc.set_style(el, "transform-origin", direction.enter_pivot());
            doc.add_class(el, direction.enter_class());
        }
        self.state = NavigationState::Viewing(target.to_string());

        self.build_secondary_navigation(doc, target, lang);
        if let Some(secondary) = doc.get_element_by_id(markup::SECONDARY_NAVIGATION) {
            doc.set_style(secondary, "display", "block");
        }
        scroll_container(doc);

        self.phase = TransitionPhase::EnteringNew {
            to: target.to_string(),
            direction,
            until_ms: now_ms.saturating_add(duration_ms(self.timings.settle)),
        };
    }

    /// Fire every phase whose deadline is at or before `now_ms`.
    pub fn tick(&mut self, doc: &mut Document, lang: Language, now_ms: u64) {
        loop {
            let due = match &self.phase {
                TransitionPhase::Idle => false,
                TransitionPhase::ExitingOld { until_ms, .. }
                | TransitionPhase::EnteringNew { until_ms, .. } => *until_ms <= now_ms,
            };
            if !due {
                return;
            }
            self.complete_phase(doc, lang);
        }
    }

    fn complete_phase(&mut self, doc: &mut Document, lang: Language) {
        match std::mem::replace(&mut self.phase, TransitionPhase::Idle) {
            TransitionPhase::Idle => {}
            TransitionPhase::ExitingOld {
                to,
                direction,
                until_ms,
                ..
            } => self.begin_entry(doc, &to, direction, lang, until_ms),
            TransitionPhase::EnteringNew { to, until_ms, .. } => {
                if let Some(el) = doc.get_element_by_id(&to) {
                    clear_transition(doc, el);
                }
                self.wire_pager(doc, &to, lang);
                if let Some(next) = self.queued.take() {
                    self.start(doc, &next, lang, until_ms);
                }
            }
        }
    }

    /// Where the page will rest once pending work is done.
    fn settled_section(&self) -> Option<&str> {
        if let Some(q) = self.queued.as_deref() {
            return Some(q);
        }
        match &self.phase {
            TransitionPhase::ExitingOld { to, .. } | TransitionPhase::EnteringNew { to, .. } => {
                Some(to)
            }
            TransitionPhase::Idle => self.current_section(),
        }
    }

    fn neighbour(&self, step: isize) -> Option<String> {
        let idx = self.ordinal(self.settled_section()?)?;
        let target = idx.checked_add_signed(step)?;
        self.order.get(target).cloned()
    }

    pub fn next(&mut self, doc: &mut Document, lang: Language, now_ms: u64) -> Option<NavigateOutcome> {
        let target = self.neighbour(1)?;
        Some(self.navigate_to(doc, &target, lang, now_ms))
    }

    pub fn previous(
        &mut self,
        doc: &mut Document,
        lang: Language,
        now_ms: u64,
    ) -> Option<NavigateOutcome> {
        let target = self.neighbour(-1)?;
        Some(self.navigate_to(doc, &target, lang, now_ms))
    }

    /// Swiping left pulls in the following section, right the preceding one.
    pub fn swipe(
        &mut self,
        doc: &mut Document,
        swipe: SwipeDirection,
        lang: Language,
        now_ms: u64,
    ) -> Option<NavigateOutcome> {
        match swipe {
            SwipeDirection::Left => self.next(doc, lang, now_ms),
            SwipeDirection::Right => self.previous(doc, lang, now_ms),
        }
    }

    /// Refill the secondary grid with every section except `active_id`.
    pub fn build_secondary_navigation(&self, doc: &mut Document, active_id: &str, lang: Language) {
        let Some(grid) = doc.get_element_by_id(markup::SECONDARY_BUTTONS_GRID) else {
            return;
        };
        doc.clear_children(grid);
        let Some(main) = doc.get_element_by_id(markup::MAIN_BUTTONS_GRID) else {
            return;
        };

        for original in doc.find_by_class(main, markup::MENU_BUTTON) {
            match doc.attr(original, markup::DATA_TARGET) {
                Some(target) if target != active_id => {}
                _ => continue,
            }
            let copy = doc.deep_clone(original);
            if let Some(label) = doc.attr(original, lang.data_attribute()).map(str::to_string) {
                doc.set_text_content(copy, &label);
            }
            doc.remove_attr(copy, "id");
            doc.append_child(grid, copy);
        }
    }

    /// Point the pager at the neighbours of `section_id`, labelled in `lang`.
    pub(crate) fn wire_pager(&self, doc: &mut Document, section_id: &str, lang: Language) {
        let Some(idx) = self.ordinal(section_id) else {
            return;
        };
        let Some(pager) = doc
            .get_element_by_id(section_id)
            .and_then(|s| doc.first_by_class(s, markup::SECTION_PAGER))
        else {
            return;
        };

        let prev = idx.checked_sub(1).and_then(|i| self.order.get(i)).cloned();
        let next = self.order.get(idx + 1).cloned();
        for (class, target, direction) in [
            (markup::PAGER_PREV, prev, Direction::Backward),
            (markup::PAGER_NEXT, next, Direction::Forward),
        ] {
            let Some(button) = doc.first_by_class(pager, class) else {
                continue;
            };
            match target {
                Some(target) => {
                    let title = section_title(doc, &target, lang);
                    let label = match direction {
                        Direction::Backward => format!("‹ {title}"),
                        Direction::Forward => format!("{title} ›"),
                    };
                    doc.set_attr(button, markup::DATA_TARGET, &target);
                    doc.set_disabled(button, false);
                    doc.set_style(button, "display", "inline-flex");
                    doc.set_text_content(button, &label);
                }
                None => {
                    doc.remove_attr(button, markup::DATA_TARGET);
                    doc.set_disabled(button, true);
                    doc.set_style(button, "display", "none");
                    doc.clear_children(button);
                }
            }
        }
    }
}

/// Title of a section as its home-grid button shows it in `lang`.
fn section_title(doc: &Document, id: &str, lang: Language) -> String {
    let button = doc.get_element_by_id(markup::MAIN_BUTTONS_GRID).and_then(|grid| {
        doc.find_by_class(grid, markup::MENU_BUTTON)
            .into_iter()
            .find(|&b| doc.attr(b, markup::DATA_TARGET) == Some(id))
    });
    button
        .and_then(|b| {
            doc.attr(b, lang.data_attribute())
                .or_else(|| doc.attr(b, SOURCE_LANGUAGE.data_attribute()))
        })
        .unwrap_or(id)
        .to_string()
}

fn clear_transition(doc: &mut Document, el: NodeId) {
    for class in TRANSITION_CLASSES {
        doc.remove_class(el, class);
    }
}

fn scroll_container(doc: &mut Document) {
    if let Some(container) = doc.get_element_by_id(markup::MENU_CONTAINER) {
        doc.scroll_into_view(container);
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
