//! Dropdown list overlay: the option list primitive the combobox drives.
//!
//! A [`Dropdown`] owns an ordered option list, an *active* index (the option
//! whose toggle is on, settable without notifying anyone), a keyboard cursor,
//! and a show/hide transition with an adjustable duration. It renders as an
//! overlay anchored below a given area and knows which row sits under a
//! mouse click.

use crate::option::Item;
use combo_core::command::Command;
use combo_core::component::Component;
use combo_core::subscription::{subscribe, Subscription};
use combo_core::subscriptions::Every;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use unicode_width::UnicodeWidthChar;

/// Interval between fade steps while a transition runs.
pub const FADE_FRAME: Duration = Duration::from_millis(16);

static NEXT_FADE_ID: AtomicU64 = AtomicU64::new(0);

/// Style configuration for the dropdown.
#[derive(Debug, Clone)]
pub struct DropdownStyle {
    /// Style for ordinary rows.
    pub item: Style,
    /// Style for the row under the keyboard cursor.
    pub cursor_item: Style,
    /// Style for the active row (toggle on).
    pub active_item: Style,
    /// Style for the "no matches" row.
    pub empty: Style,
    /// Marker drawn before the active row.
    pub toggle_on: String,
    /// Marker drawn before every other row.
    pub toggle_off: String,
    /// Text shown when the list is empty.
    pub empty_text: String,
}

impl Default for DropdownStyle {
    fn default() -> Self {
        Self {
            item: Style::default(),
            cursor_item: Style::default().add_modifier(Modifier::REVERSED),
            active_item: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            empty: Style::default().fg(Color::DarkGray),
            toggle_on: "● ".to_string(),
            toggle_off: "○ ".to_string(),
            empty_text: "No matches".to_string(),
        }
    }
}

/// Messages for the dropdown component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press forwarded to the list (Up/Down/Home/End/Enter/Esc).
    KeyPress(KeyEvent),
    /// A left click at `(column, row)` in screen coordinates.
    Click(u16, u16),
    /// One step of the show/hide transition.
    FadeTick,
    /// An option was chosen (index into the current items, label).
    Selected(usize, String),
    /// The list was dismissed with Esc.
    Dismissed,
}

/// An option list overlay with a silent active index and a fade transition.
///
/// # Example
///
/// ```ignore
/// use combo_widgets::dropdown::Dropdown;
///
/// let mut list = Dropdown::new()
///     .with_max_visible(6)
///     .with_fade(Duration::from_millis(120));
/// list.set_items(vec!["Apple", "Banana"]);
/// list.set_active_silent(Some(1));
/// list.show();
/// ```
pub struct Dropdown<I: Item> {
    items: Vec<I>,
    active: Option<usize>,
    cursor: usize,
    offset: usize,
    max_visible: usize,
    style: DropdownStyle,
    block: Option<Block<'static>>,
    fade: Duration,
    fade_id: String,
    shown: bool,
    opacity: f32,
    rows_area: Cell<Option<Rect>>,
}

impl<I: Item> Dropdown<I> {
    /// Create a hidden, empty dropdown.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            active: None,
            cursor: 0,
            offset: 0,
            max_visible: 8,
            style: DropdownStyle::default(),
            block: None,
            fade: Duration::ZERO,
            fade_id: format!(
                "combo-dropdown-fade-{}",
                NEXT_FADE_ID.fetch_add(1, Ordering::Relaxed)
            ),
            shown: false,
            opacity: 0.0,
            rows_area: Cell::new(None),
        }
    }

    /// Maximum number of rows before the list scrolls.
    pub fn with_max_visible(mut self, max: usize) -> Self {
        self.max_visible = max.max(1);
        self.scroll_to_cursor();
        self
    }

    /// Set the style configuration.
    pub fn with_style(mut self, style: DropdownStyle) -> Self {
        self.style = style;
        self
    }

    /// Wrap the rows in a block (border/title).
    pub fn with_block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    /// Duration of the show/hide transition. Zero (the default) is instant.
    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.fade = fade;
        self
    }

    /// Replace the options. The active index is cleared and the cursor is
    /// clamped; visibility is unchanged.
    pub fn set_items(&mut self, items: Vec<I>) {
        self.items = items;
        self.active = None;
        self.cursor = self.cursor.min(self.items.len().saturating_sub(1));
        self.scroll_to_cursor();
    }

    /// The current options.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Set the active option without emitting [`Message::Selected`].
    ///
    /// The active option has its toggle on and every other toggle off. The
    /// cursor follows it and it is scrolled into view. An index past the end
    /// counts as `None`.
    pub fn set_active_silent(&mut self, index: Option<usize>) {
        self.active = index.filter(|&i| i < self.items.len());
        if let Some(i) = self.active {
            self.cursor = i;
        }
        self.scroll_to_cursor();
    }

    /// Index of the active option.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// The active option.
    pub fn active_item(&self) -> Option<&I> {
        self.active.and_then(|i| self.items.get(i))
    }

    /// Whether the row at `index` has its toggle on.
    pub fn is_toggled(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Index of the row under the keyboard cursor, if the list has rows.
    pub fn cursor(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.cursor)
    }

    /// First row currently scrolled into view.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Start showing the list, fading in over the configured duration.
    pub fn show(&mut self) {
        self.shown = true;
        if self.fade.is_zero() {
            self.opacity = 1.0;
        }
    }

    /// Start hiding the list, fading out over the configured duration.
    pub fn hide(&mut self) {
        self.shown = false;
        if self.fade.is_zero() {
            self.opacity = 0.0;
        }
    }

    /// Run a hide/show cycle with the transition bypassed, so the list is
    /// fully visible right away and its geometry matches the current items.
    pub fn rebuild(&mut self) {
        let fade = std::mem::replace(&mut self.fade, Duration::ZERO);
        self.hide();
        self.show();
        self.fade = fade;
        self.rows_area.set(None);
        self.scroll_to_cursor();
    }

    /// Whether the list is shown or still fading out.
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Whether the list has been asked to show.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Current opacity in `0.0..=1.0`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether a transition is still running.
    pub fn is_animating(&self) -> bool {
        let target = if self.shown { 1.0 } else { 0.0 };
        self.opacity != target
    }

    /// Index of the option drawn at `(column, row)` on the last render.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.rows_area.get()?;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside {
            return None;
        }
        let index = self.offset + (row - area.y) as usize;
        (index < self.items.len()).then_some(index)
    }

    /// Whether `(column, row)` falls inside the last rendered overlay,
    /// borders included.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let Some(rows) = self.rows_area.get() else {
            return false;
        };
        let outer = if self.block.is_some() {
            Rect::new(
                rows.x.saturating_sub(1),
                rows.y.saturating_sub(1),
                rows.width + 2,
                rows.height + 2,
            )
        } else {
            rows
        };
        column >= outer.x
            && column < outer.x + outer.width
            && row >= outer.y
            && row < outer.y + outer.height
    }

    fn move_cursor(&mut self, down: bool) {
        let count = self.items.len();
        if count == 0 {
            return;
        }
        self.cursor = match (down, self.cursor) {
            (true, c) if c + 1 >= count => 0,
            (true, c) => c + 1,
            (false, 0) => count - 1,
            (false, c) => c - 1,
        };
        self.scroll_to_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        let count = self.items.len();
        if count == 0 {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.max_visible {
            self.offset = self.cursor + 1 - self.max_visible;
        }
        self.offset = self.offset.min(count.saturating_sub(self.max_visible));
    }

    fn step_fade(&mut self) {
        let step = if self.fade.is_zero() {
            1.0
        } else {
            FADE_FRAME.as_secs_f32() / self.fade.as_secs_f32()
        };
        self.opacity = if self.shown {
            (self.opacity + step).min(1.0)
        } else {
            (self.opacity - step).max(0.0)
        };
    }

    fn choose(&mut self, index: usize) -> Command<Message> {
        match self.items.get(index) {
            Some(item) => {
                let label = item.label().to_string();
                self.cursor = index;
                self.hide();
                Command::message(Message::Selected(index, label))
            }
            None => Command::none(),
        }
    }

    fn overlay_area(&self, anchor: Rect) -> Rect {
        let rows = self.items.len().clamp(1, self.max_visible) as u16;
        let height = if self.block.is_some() { rows + 2 } else { rows };
        Rect::new(anchor.x, anchor.y + anchor.height, anchor.width, height)
    }

    fn render_row(&self, index: usize, item: &I, width: u16) -> Line<'static> {
        let mut style = self.style.item;
        if self.is_toggled(index) {
            style = style.patch(self.style.active_item);
        }
        if index == self.cursor {
            style = style.patch(self.style.cursor_item);
        }
        let toggle = if self.is_toggled(index) {
            &self.style.toggle_on
        } else {
            &self.style.toggle_off
        };
        let text = truncate(&format!("{toggle}{}", item.label()), width as usize);
        Line::from(Span::styled(text, style))
    }
}

impl<I: Item> Default for Dropdown<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Item> Component for Dropdown<I> {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => match key.code {
                KeyCode::Up => {
                    self.move_cursor(false);
                    Command::none()
                }
                KeyCode::Down => {
                    self.move_cursor(true);
                    Command::none()
                }
                KeyCode::Home => {
                    self.cursor = 0;
                    self.scroll_to_cursor();
                    Command::none()
                }
                KeyCode::End => {
                    self.cursor = self.items.len().saturating_sub(1);
                    self.scroll_to_cursor();
                    Command::none()
                }
                KeyCode::Enter => self.choose(self.cursor),
                KeyCode::Esc => {
                    self.hide();
                    Command::message(Message::Dismissed)
                }
                _ => Command::none(),
            },
            Message::Click(column, row) => match self.row_at(column, row) {
                Some(index) => self.choose(index),
                None => Command::none(),
            },
            Message::FadeTick => {
                self.step_fade();
                Command::none()
            }
            Message::Selected(..) | Message::Dismissed => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, anchor: Rect) {
        if !self.is_visible() {
            self.rows_area.set(None);
            return;
        }

        let area = self.overlay_area(anchor).intersection(frame.area());
        if area.height == 0 || area.width < 4 {
            self.rows_area.set(None);
            return;
        }

        frame.render_widget(Clear, area);
        let inner = match self.block {
            Some(ref block) => {
                let inner = block.inner(area);
                frame.render_widget(block.clone(), area);
                inner
            }
            None => area,
        };
        self.rows_area.set(Some(inner));

        let dim = if self.opacity < 1.0 {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };

        if self.items.is_empty() {
            let line = Line::from(Span::styled(self.style.empty_text.clone(), self.style.empty));
            frame.render_widget(Paragraph::new(line).style(dim), inner);
            return;
        }

        for (row, (index, item)) in self
            .items
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(inner.height as usize)
            .enumerate()
        {
            let row_area = Rect {
                y: inner.y + row as u16,
                height: 1,
                ..inner
            };
            let line = self.render_row(index, item, row_area.width);
            frame.render_widget(Paragraph::new(line).style(dim), row_area);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if self.is_animating() {
            vec![
                subscribe(Every::new(FADE_FRAME, self.fade_id.clone()))
                    .map(|_| Message::FadeTick),
            ]
        } else {
            vec![]
        }
    }

    fn focused(&self) -> bool {
        self.shown
    }
}

/// Cut `text` to `width` columns, ending in "..." when something was cut.
fn truncate(text: &str, width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if width >= 3 {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use combo_core::testing::ComponentHarness;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn fruits() -> Dropdown<&'static str> {
        let mut dropdown = Dropdown::new();
        dropdown.set_items(vec!["Apple", "Banana", "Avocado"]);
        dropdown
    }

    #[test]
    fn new_is_hidden_and_empty() {
        let dropdown: Dropdown<String> = Dropdown::new();
        assert!(!dropdown.is_visible());
        assert!(dropdown.items().is_empty());
        assert_eq!(dropdown.cursor(), None);
        assert_eq!(dropdown.active(), None);
    }

    #[test]
    fn set_items_keeps_visibility() {
        let mut dropdown = fruits();
        assert!(!dropdown.is_visible());
        dropdown.show();
        dropdown.set_items(vec!["Kiwi"]);
        assert!(dropdown.is_visible());
        assert_eq!(dropdown.cursor(), Some(0));
    }

    #[test]
    fn set_items_clears_active() {
        let mut dropdown = fruits();
        dropdown.set_active_silent(Some(2));
        dropdown.set_items(vec!["Apple", "Banana", "Avocado"]);
        assert_eq!(dropdown.active(), None);
    }

    #[test]
    fn active_is_silent_and_toggles_one_row() {
        let mut harness = ComponentHarness::new(fruits());
        harness.component_mut().set_active_silent(Some(1));
        assert!(harness.log().is_empty());

        let dropdown = harness.component();
        assert_eq!(dropdown.active_item(), Some(&"Banana"));
        assert_eq!(dropdown.cursor(), Some(1));
        assert!(dropdown.is_toggled(1));
        assert!(!dropdown.is_toggled(0));
        assert!(!dropdown.is_toggled(2));
    }

    #[test]
    fn out_of_range_active_is_none() {
        let mut dropdown = fruits();
        dropdown.set_active_silent(Some(1));
        dropdown.set_active_silent(Some(3));
        assert_eq!(dropdown.active(), None);
        assert!((0..3).all(|i| !dropdown.is_toggled(i)));
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut dropdown = fruits();
        dropdown.update(Message::KeyPress(key(KeyCode::Up)));
        assert_eq!(dropdown.cursor(), Some(2));
        dropdown.update(Message::KeyPress(key(KeyCode::Down)));
        assert_eq!(dropdown.cursor(), Some(0));
        dropdown.update(Message::KeyPress(key(KeyCode::End)));
        assert_eq!(dropdown.cursor(), Some(2));
        dropdown.update(Message::KeyPress(key(KeyCode::Home)));
        assert_eq!(dropdown.cursor(), Some(0));
    }

    #[test]
    fn enter_selects_cursor_row_and_hides() {
        let mut dropdown = fruits();
        dropdown.show();
        dropdown.update(Message::KeyPress(key(KeyCode::Down)));
        let cmd = dropdown.update(Message::KeyPress(key(KeyCode::Enter)));
        match cmd.into_message() {
            Some(Message::Selected(1, label)) => assert_eq!(label, "Banana"),
            other => panic!("Expected Selected(1, Banana), got {other:?}"),
        }
        assert!(!dropdown.is_visible());
    }

    #[test]
    fn enter_on_empty_list_does_nothing() {
        let mut dropdown: Dropdown<&str> = Dropdown::new();
        dropdown.show();
        let cmd = dropdown.update(Message::KeyPress(key(KeyCode::Enter)));
        assert!(cmd.is_none());
        assert!(dropdown.is_shown());
    }

    #[test]
    fn esc_dismisses() {
        let mut dropdown = fruits();
        dropdown.show();
        let cmd = dropdown.update(Message::KeyPress(key(KeyCode::Esc)));
        assert!(matches!(cmd.into_message(), Some(Message::Dismissed)));
        assert!(!dropdown.is_visible());
    }

    #[test]
    fn scrolls_to_active() {
        let mut dropdown = Dropdown::new().with_max_visible(2);
        dropdown.set_items(vec!["a", "b", "c", "d", "e"]);
        dropdown.set_active_silent(Some(3));
        assert_eq!(dropdown.offset(), 2);
        dropdown.set_active_silent(Some(0));
        assert_eq!(dropdown.offset(), 0);
    }

    #[test]
    fn fade_runs_over_ticks() {
        let mut dropdown = fruits().with_fade(FADE_FRAME * 4);
        dropdown.show();
        assert!(!dropdown.is_visible());
        assert!(dropdown.is_animating());
        assert_eq!(dropdown.subscriptions().len(), 1);

        for _ in 0..4 {
            dropdown.update(Message::FadeTick);
        }
        assert!((dropdown.opacity() - 1.0).abs() < f32::EPSILON);
        assert!(!dropdown.is_animating());
        assert!(dropdown.subscriptions().is_empty());

        dropdown.hide();
        dropdown.update(Message::FadeTick);
        assert!(dropdown.is_visible());
        assert!(dropdown.opacity() < 1.0);
    }

    #[test]
    fn each_dropdown_has_its_own_fade_timer() {
        let mut first = fruits().with_fade(FADE_FRAME * 4);
        let mut second = fruits().with_fade(FADE_FRAME * 4);
        first.show();
        second.show();
        let first_subs = first.subscriptions();
        let second_subs = second.subscriptions();
        assert_ne!(first_subs[0].id(), second_subs[0].id());

        // The id stays put while a transition runs.
        first.update(Message::FadeTick);
        assert_eq!(first.subscriptions()[0].id(), first_subs[0].id());
    }

    #[test]
    fn rebuild_bypasses_fade() {
        let mut dropdown = fruits().with_fade(Duration::from_secs(1));
        dropdown.show();
        assert!(dropdown.is_animating());

        dropdown.rebuild();
        assert!((dropdown.opacity() - 1.0).abs() < f32::EPSILON);
        assert!(!dropdown.is_animating());

        // The configured duration still applies afterwards.
        dropdown.hide();
        assert!(dropdown.is_animating());
    }

    #[test]
    fn renders_below_anchor_with_toggles() {
        let mut dropdown = fruits();
        dropdown.set_active_silent(Some(2));
        dropdown.show();
        let harness = ComponentHarness::new(dropdown);
        let screen = harness.render_string(20, 5, Rect::new(0, 0, 20, 1));
        let rows: Vec<&str> = screen.lines().collect();
        assert!(rows[0].trim().is_empty());
        assert!(rows[1].starts_with("○ Apple"));
        assert!(rows[2].starts_with("○ Banana"));
        assert!(rows[3].starts_with("● Avocado"));
    }

    #[test]
    fn renders_no_matches_when_empty() {
        let mut dropdown: Dropdown<&str> = Dropdown::new();
        dropdown.show();
        let harness = ComponentHarness::new(dropdown);
        let screen = harness.render_string(20, 3, Rect::new(0, 0, 20, 1));
        assert!(screen.contains("No matches"));
    }

    #[test]
    fn click_hits_rendered_rows() {
        let mut dropdown = fruits();
        dropdown.show();
        let mut harness = ComponentHarness::new(dropdown);
        let _ = harness.render(20, 6, Rect::new(0, 1, 20, 1));

        assert_eq!(harness.component().row_at(3, 3), Some(1));
        assert_eq!(harness.component().row_at(3, 1), None);
        assert!(harness.component().contains(0, 4));
        assert!(!harness.component().contains(0, 5));

        harness.send(Message::Click(3, 4));
        assert!(matches!(
            harness.log().last(),
            Some(Message::Selected(2, label)) if label == "Avocado"
        ));
    }

    #[test]
    fn truncate_respects_width() {
        assert_eq!(truncate("Watermelon", 20), "Watermelon");
        assert_eq!(truncate("Watermelon", 8), "Water...");
        assert_eq!(truncate("Watermelon", 2), "");
    }
}
