//! Searchable dropdown: a [`Dropdown`] whose options are narrowed by a
//! [`SearchField`] while it is open.
//!
//! The combobox keeps the full option list in an [`OptionStore`] for the
//! length of a focus session. Every keystroke refilters that list into the
//! dropdown and puts the remembered selection back on whichever visible row
//! carries the same label, so filtering never loses the user's choice.
//!
//! # Lifecycle
//!
//! ```text
//!            focus (click / Enter / Space / Down / first keystroke)
//!   Closed ─────────────────────────────────────────────────────▶ Open
//!     ▲                                                            │
//!     │        unfocus (Esc / Tab / pick / click outside)          │
//!     └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Claiming focus on the search field ends its previous edit, and an ended
//! edit normally asks the combobox to close. Opening therefore arms a one-shot
//! flag that swallows the first close request of the session.

use crate::dropdown::{self, Dropdown, DropdownStyle};
use crate::filter::filter;
use crate::option::{position_of, term, Item};
use crate::search_field::{self, SearchField, SearchFieldStyle};
use crate::store::OptionStore;
use combo_core::command::Command;
use combo_core::component::Component;
use combo_core::event::TerminalEvent;
use combo_core::subscription::Subscription;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Style configuration for the combobox and the widgets it owns.
#[derive(Debug, Clone)]
pub struct ComboboxStyle {
    /// Style for the selected label on the closed trigger row.
    pub trigger: Style,
    /// Style for the placeholder when there is nothing to show.
    pub placeholder: Style,
    /// Style for the open/closed arrow.
    pub arrow: Style,
    /// Arrow drawn while closed.
    pub closed_arrow: String,
    /// Arrow drawn while open.
    pub open_arrow: String,
    /// Style for the disabled trigger row.
    pub disabled: Style,
    /// Style for the option list.
    pub dropdown: DropdownStyle,
    /// Style for the search field.
    pub search: SearchFieldStyle,
}

impl Default for ComboboxStyle {
    fn default() -> Self {
        Self {
            trigger: Style::default().add_modifier(Modifier::BOLD),
            placeholder: Style::default().fg(Color::DarkGray),
            arrow: Style::default().fg(Color::Cyan),
            closed_arrow: "▾".to_string(),
            open_arrow: "▴".to_string(),
            disabled: Style::default().fg(Color::DarkGray),
            dropdown: DropdownStyle::default(),
            search: SearchFieldStyle::default(),
        }
    }
}

/// Messages for the combobox.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press routed to the combobox.
    Key(KeyEvent),
    /// A left click at `(column, row)` in screen coordinates.
    Click(u16, u16),
    /// Pasted text; opens the list first when closed.
    Paste(String),
    /// Ask the combobox to open.
    Focus,
    /// Ask the combobox to close.
    Unfocus,
    /// Traffic from the search field.
    Search(search_field::Message),
    /// Traffic from the option list.
    List(dropdown::Message),
    /// Emitted after a pick: index into the full option list, and its label.
    Selected(usize, String),
    /// Emitted when a focus session starts.
    Opened,
    /// Emitted when a focus session ends.
    Closed,
}

impl Message {
    /// Translate a terminal event into a combobox message: key presses, left
    /// clicks, and pastes. Everything else yields `None`.
    pub fn from_event(event: &TerminalEvent) -> Option<Self> {
        if let Some(key) = event.key_press() {
            return Some(Message::Key(key));
        }
        if let Some((column, row)) = event.left_click() {
            return Some(Message::Click(column, row));
        }
        match event {
            TerminalEvent::Paste(text) => Some(Message::Paste(text.clone())),
            _ => None,
        }
    }
}

/// A dropdown whose option list can be narrowed by typing.
///
/// # Example
///
/// ```ignore
/// use combo_widgets::combobox::{Combobox, Message};
///
/// let mut fruit = Combobox::new(vec!["Apple", "Banana", "Avocado"])
///     .with_placeholder("Pick a fruit")
///     .with_max_visible(6);
///
/// // In the parent's update:
/// // Msg::Fruit(combobox::Message::Selected(index, label)) => { ... }
/// // Msg::Fruit(m) => self.fruit.update(m).map(Msg::Fruit),
/// ```
pub struct Combobox<I: Item> {
    store: OptionStore<I>,
    dropdown: Dropdown<I>,
    search: SearchField,
    suppress_close: bool,
    enabled: bool,
    placeholder: String,
    style: ComboboxStyle,
    trigger_area: Cell<Option<Rect>>,
}

impl<I: Item> Combobox<I> {
    /// Create an enabled, closed combobox over `options` with the first option
    /// selected.
    pub fn new(options: Vec<I>) -> Self {
        let mut dropdown = Dropdown::new();
        dropdown.set_items(options.clone());
        let mut combobox = Self {
            store: OptionStore::new(options),
            dropdown,
            search: SearchField::new("Search...").with_prompt("/ "),
            suppress_close: false,
            enabled: true,
            placeholder: String::new(),
            style: ComboboxStyle::default(),
            trigger_area: Cell::new(None),
        };
        combobox.reapply_selection();
        combobox
    }

    /// Text shown on the trigger row when there are no options.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Text shown in the empty search field.
    pub fn with_search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search.set_placeholder(placeholder);
        self
    }

    /// Maximum number of list rows before scrolling.
    pub fn with_max_visible(mut self, max: usize) -> Self {
        self.dropdown = self.dropdown.with_max_visible(max);
        self
    }

    /// Duration of the list's show/hide transition.
    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.dropdown = self.dropdown.with_fade(fade);
        self
    }

    /// Set the style configuration, including the list and search field.
    pub fn with_style(mut self, style: ComboboxStyle) -> Self {
        self.dropdown = self.dropdown.with_style(style.dropdown.clone());
        self.search = self.search.with_style(style.search.clone());
        self.style = style;
        self
    }

    /// Draw a block around the option list.
    pub fn with_block(mut self, block: Block<'static>) -> Self {
        self.dropdown = self.dropdown.with_block(block);
        self
    }

    // --- Host-facing dropdown API ---

    /// The full option list.
    pub fn options(&self) -> &[I] {
        if self.store.is_active() {
            self.store.persistent()
        } else {
            self.dropdown.items()
        }
    }

    /// The options currently drawn in the list.
    pub fn visible_options(&self) -> &[I] {
        self.dropdown.items()
    }

    /// Replace the options. While open, the new list is refiltered with the
    /// current search text.
    pub fn set_options(&mut self, options: Vec<I>) {
        if !self.enabled {
            self.dropdown.set_items(options);
            return;
        }
        self.store.replace(options);
        if self.store.is_active() {
            self.refilter(&self.search.value());
        } else {
            self.dropdown.set_items(self.store.persistent().to_vec());
            self.reapply_selection();
        }
    }

    /// Index of the selected option in the full list.
    pub fn value(&self) -> usize {
        self.store.value()
    }

    /// Select the option at `index` (clamped) without emitting
    /// [`Message::Selected`].
    pub fn set_value(&mut self, index: usize) {
        self.store.set_value(index);
        self.reapply_selection();
    }

    /// The selected option, if the list is not empty.
    pub fn selected_option(&self) -> Option<&I> {
        self.store.persistent_selection()
    }

    /// Whether a focus session is running.
    pub fn is_open(&self) -> bool {
        self.store.is_active()
    }

    /// The current search text.
    pub fn search_text(&self) -> String {
        self.search.value()
    }

    /// Whether input is being handled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the close-request guard is armed.
    pub fn is_close_suppressed(&self) -> bool {
        self.suppress_close
    }

    /// Highlight index in the visible list.
    pub fn active_index(&self) -> Option<usize> {
        self.dropdown.active()
    }

    /// Start handling input: the current options become the full list, the
    /// first one is selected.
    pub fn enable(&mut self) {
        self.store.reset(self.dropdown.items().to_vec());
        self.suppress_close = false;
        self.enabled = true;
        self.reapply_selection();
        tracing::debug!(options = self.store.persistent().len(), "combobox enabled");
    }

    /// Stop handling input and drop all session state. The list closes and
    /// shows the full option set again.
    pub fn disable(&mut self) {
        if self.store.is_active() {
            self.dropdown.set_items(self.store.persistent().to_vec());
        }
        self.store.clear();
        self.suppress_close = false;
        self.enabled = false;
        self.dropdown.set_active_silent(None);
        self.dropdown.hide();
        self.search.blur();
        self.search.clear();
        tracing::debug!("combobox disabled");
    }

    // --- Transitions ---

    /// Open: snapshot the visible options as the full list, show all of them,
    /// put the selection back, and hand focus to the search field.
    pub fn request_focus(&mut self) -> Command<Message> {
        if !self.enabled || self.store.is_active() {
            return Command::none();
        }
        let visible = self.dropdown.items().to_vec();
        self.store.capture_session(&visible);
        self.dropdown.set_items(filter(self.store.persistent(), ""));
        self.reapply_selection();
        self.dropdown.show();

        let claim = self.search.claim_focus().map(Message::Search);
        self.suppress_close = true;
        tracing::debug!(
            options = self.store.persistent().len(),
            "combobox opened"
        );
        Command::batch([claim, Command::message(Message::Opened)])
    }

    /// Refilter the full list with `text` and put the selection back.
    pub fn search_changed(&mut self, text: &str) -> Command<Message> {
        if !self.store.is_active() {
            return Command::none();
        }
        self.refilter(text);
        Command::none()
    }

    /// Commit the option labelled `label`, hide the list, and ask to close.
    pub fn pick(&mut self, label: &str) -> Command<Message> {
        if !self.store.is_active() {
            return Command::none();
        }
        let index = self.store.commit_selection(&term(label));
        self.reapply_selection();
        self.dropdown.hide();

        let selected = self
            .store
            .persistent_selection()
            .map(|option| option.label().to_string());
        tracing::debug!(index, label = ?selected, "combobox pick committed");

        match selected {
            Some(label) => Command::batch([
                Command::message(Message::Selected(index, label)),
                Command::message(Message::Unfocus),
            ]),
            None => Command::message(Message::Unfocus),
        }
    }

    /// Close: end the session and restore the full list. The first request
    /// after opening is swallowed.
    pub fn request_unfocus(&mut self) -> Command<Message> {
        if self.suppress_close {
            self.suppress_close = false;
            tracing::trace!("combobox close request suppressed");
            return Command::none();
        }
        if !self.store.is_active() {
            return Command::none();
        }
        self.store.end_session();
        self.dropdown.set_items(self.store.persistent().to_vec());
        self.dropdown.set_active_silent(Some(self.store.value()));
        self.dropdown.hide();
        self.search.blur();
        self.search.clear();
        tracing::debug!(value = self.store.value(), "combobox closed");
        Command::message(Message::Closed)
    }

    fn refilter(&mut self, text: &str) {
        let visible = filter(self.store.persistent(), text);
        tracing::trace!(
            term = %term(text),
            visible = visible.len(),
            "combobox refiltered"
        );
        self.dropdown.set_items(visible);
        self.reapply_selection();
        self.dropdown.rebuild();
    }

    /// Highlight the visible row whose label matches the selected option, or
    /// nothing when it has been filtered out.
    fn reapply_selection(&mut self) {
        let active = self
            .store
            .persistent_selection()
            .and_then(|selected| position_of(self.dropdown.items(), &term(selected.label())));
        self.dropdown.set_active_silent(active);
    }

    // --- Input mapping ---

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if !self.store.is_active() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => self.request_focus(),
                KeyCode::Char(_)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    let open = self.request_focus();
                    let typed = self
                        .search
                        .update(search_field::Message::KeyPress(key))
                        .map(Message::Search);
                    Command::batch([open, typed])
                }
                _ => Command::none(),
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
                let key = match key.code {
                    KeyCode::PageUp => KeyEvent { code: KeyCode::Home, ..key },
                    KeyCode::PageDown => KeyEvent { code: KeyCode::End, ..key },
                    _ => key,
                };
                self.dropdown
                    .update(dropdown::Message::KeyPress(key))
                    .map(Message::List)
            }
            KeyCode::Enter if self.dropdown.items().is_empty() => self.request_unfocus(),
            KeyCode::Enter => self
                .dropdown
                .update(dropdown::Message::KeyPress(key))
                .map(Message::List),
            KeyCode::Esc | KeyCode::Tab => self.request_unfocus(),
            _ => self
                .search
                .update(search_field::Message::KeyPress(key))
                .map(Message::Search),
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) -> Command<Message> {
        let on_trigger = self
            .trigger_area
            .get()
            .is_some_and(|area| area.contains((column, row).into()));

        if !self.store.is_active() {
            return if on_trigger {
                self.request_focus()
            } else {
                Command::none()
            };
        }

        if self.dropdown.row_at(column, row).is_some() {
            self.dropdown
                .update(dropdown::Message::Click(column, row))
                .map(Message::List)
        } else if on_trigger || self.dropdown.contains(column, row) {
            Command::none()
        } else {
            self.request_unfocus()
        }
    }

    fn render_trigger(&self, frame: &mut Frame, row: Rect) {
        let arrow = if self.store.is_active() {
            &self.style.open_arrow
        } else {
            &self.style.closed_arrow
        };
        let arrow_width = arrow.width() as u16;
        let text_width = row.width.saturating_sub(arrow_width + 1);
        let text_area = Rect { width: text_width, ..row };
        let arrow_area = Rect {
            x: row.x + row.width.saturating_sub(arrow_width),
            width: arrow_width.min(row.width),
            ..row
        };

        if self.store.is_active() {
            self.search.view(frame, text_area);
        } else {
            let (text, style) = match self.selected_option() {
                Some(option) => (option.label().to_string(), self.style.trigger),
                None => (self.placeholder.clone(), self.style.placeholder),
            };
            let style = if self.enabled { style } else { self.style.disabled };
            frame.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), text_area);
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(arrow.clone(), self.style.arrow))),
            arrow_area,
        );
    }
}

impl<I: Item> Component for Combobox<I> {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        if !self.enabled {
            return Command::none();
        }
        match msg {
            Message::Key(key) => self.handle_key(key),
            Message::Click(column, row) => self.handle_click(column, row),
            Message::Paste(text) => {
                let open = self.request_focus();
                let pasted = self
                    .search
                    .update(search_field::Message::Paste(text))
                    .map(Message::Search);
                Command::batch([open, pasted])
            }
            Message::Focus => self.request_focus(),
            Message::Unfocus => self.request_unfocus(),
            Message::Search(msg) => match msg {
                search_field::Message::Changed(text) => self.search_changed(&text),
                search_field::Message::EditEnded(_) => self.request_unfocus(),
                other => self.search.update(other).map(Message::Search),
            },
            Message::List(msg) => match msg {
                dropdown::Message::Selected(_, label) => self.pick(&label),
                dropdown::Message::Dismissed => self.request_unfocus(),
                other => self.dropdown.update(other).map(Message::List),
            },
            Message::Selected(..) | Message::Opened | Message::Closed => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            self.trigger_area.set(None);
            return;
        }
        let row = Rect { height: 1, ..area };
        self.trigger_area.set(Some(row));
        self.render_trigger(frame, row);
        self.dropdown.view(frame, row);
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        self.dropdown
            .subscriptions()
            .into_iter()
            .map(|sub| sub.map(Message::List))
            .collect()
    }

    fn focused(&self) -> bool {
        self.store.is_active()
    }
}
