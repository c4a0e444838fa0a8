//! Single-line search field with a selection range.
//!
//! The field reports every value change with [`Message::Changed`]. Taking
//! focus through [`SearchField::claim_focus`] closes the previous edit and
//! reports it with [`Message::EditEnded`], leaving the cursor and the
//! selection anchor where they were.

use combo_core::command::Command;
use combo_core::component::Component;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Style configuration for the search field.
#[derive(Debug, Clone)]
pub struct SearchFieldStyle {
    /// Style for the prompt string.
    pub prompt: Style,
    /// Style for the typed text.
    pub text: Style,
    /// Style for the placeholder.
    pub placeholder: Style,
    /// Style for the cursor cell.
    pub cursor: Style,
    /// Style for selected text.
    pub selection: Style,
}

impl Default for SearchFieldStyle {
    fn default() -> Self {
        Self {
            prompt: Style::default().fg(Color::Cyan),
            text: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            selection: Style::default().bg(Color::Blue).fg(Color::White),
        }
    }
}

/// Messages for the search field.
#[derive(Debug, Clone)]
pub enum Message {
    /// A keyboard event to process.
    KeyPress(KeyEvent),
    /// Paste text at the cursor, replacing any selection.
    Paste(String),
    /// Emitted whenever the value changes.
    Changed(String),
    /// Emitted when the previous edit ends because focus was claimed.
    EditEnded(String),
}

/// A single-line text field used to type a filter term.
///
/// # Example
///
/// ```ignore
/// let mut search = SearchField::new("Search...").with_prompt("/ ");
/// let cmd = search.claim_focus(); // yields Message::EditEnded("")
/// ```
pub struct SearchField {
    value: Vec<char>,
    cursor: usize,
    anchor: Option<usize>,
    focus: bool,
    placeholder: String,
    prompt: String,
    style: SearchFieldStyle,
}

impl SearchField {
    /// Create an empty, unfocused field with the given placeholder.
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            value: Vec::new(),
            cursor: 0,
            anchor: None,
            focus: false,
            placeholder: placeholder.into(),
            prompt: String::new(),
            style: SearchFieldStyle::default(),
        }
    }

    /// Text drawn before the value.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the style configuration.
    pub fn with_style(mut self, style: SearchFieldStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Take keyboard focus. Cursor and selection anchor are kept as they were;
    /// the edit in progress ends and is reported.
    pub fn claim_focus(&mut self) -> Command<Message> {
        self.focus = true;
        Command::message(Message::EditEnded(self.value()))
    }

    /// Release keyboard focus.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// The current text.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replace the text without emitting [`Message::Changed`]. The cursor
    /// moves to the end and the selection is dropped.
    pub fn set_value_silent(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.cursor = self.value.len();
        self.anchor = None;
    }

    /// Empty the field without emitting [`Message::Changed`].
    pub fn clear(&mut self) {
        self.set_value_silent("");
    }

    /// Whether the field holds no text.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Cursor position, in characters.
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Select the characters between `anchor` and `cursor` (both clamped).
    pub fn select(&mut self, anchor: usize, cursor: usize) {
        let len = self.value.len();
        self.anchor = Some(anchor.min(len));
        self.cursor = cursor.min(len);
    }

    /// The selected range as `(start, end)` character positions, if non-empty.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        match anchor.cmp(&self.cursor) {
            std::cmp::Ordering::Less => Some((anchor, self.cursor)),
            std::cmp::Ordering::Greater => Some((self.cursor, anchor)),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The selected text, empty when nothing is selected.
    pub fn selected_text(&self) -> String {
        match self.selection() {
            Some((start, end)) => self.value[start..end].iter().collect(),
            None => String::new(),
        }
    }

    fn changed(&self) -> Command<Message> {
        Command::message(Message::Changed(self.value()))
    }

    /// Remove the selected text. Returns whether anything was removed.
    fn delete_selection(&mut self) -> bool {
        let selection = self.selection();
        self.anchor = None;
        match selection {
            Some((start, end)) => {
                self.value.drain(start..end);
                self.cursor = start;
                true
            }
            None => false,
        }
    }

    fn insert(&mut self, text: &str) -> Command<Message> {
        let removed = self.delete_selection();
        let chars: Vec<char> = text.chars().filter(|c| !c.is_control()).collect();
        if chars.is_empty() {
            return if removed { self.changed() } else { Command::none() };
        }
        for (i, &c) in chars.iter().enumerate() {
            self.value.insert(self.cursor + i, c);
        }
        self.cursor += chars.len();
        self.changed()
    }

    fn delete_backward(&mut self) -> Command<Message> {
        if self.delete_selection() {
            return self.changed();
        }
        if self.cursor == 0 {
            return Command::none();
        }
        self.cursor -= 1;
        self.value.remove(self.cursor);
        self.changed()
    }

    fn delete_forward(&mut self) -> Command<Message> {
        if self.delete_selection() {
            return self.changed();
        }
        if self.cursor >= self.value.len() {
            return Command::none();
        }
        self.value.remove(self.cursor);
        self.changed()
    }

    fn delete_word_backward(&mut self) -> Command<Message> {
        if self.delete_selection() {
            return self.changed();
        }
        let end = self.cursor;
        while self.cursor > 0 && self.value[self.cursor - 1] == ' ' {
            self.cursor -= 1;
        }
        while self.cursor > 0 && self.value[self.cursor - 1] != ' ' {
            self.cursor -= 1;
        }
        if self.cursor == end {
            return Command::none();
        }
        self.value.drain(self.cursor..end);
        self.changed()
    }

    fn delete_to_start(&mut self) -> Command<Message> {
        self.anchor = None;
        if self.cursor == 0 {
            return Command::none();
        }
        self.value.drain(..self.cursor);
        self.cursor = 0;
        self.changed()
    }

    /// Move the cursor to `to`, extending the selection when `extend` is set
    /// and collapsing it otherwise.
    fn move_to(&mut self, to: usize, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }
        self.cursor = to.min(self.value.len());
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match (key.code, key.modifiers) {
            (KeyCode::Char('a'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.select(0, self.value.len());
                Command::none()
            }
            (KeyCode::Char('u'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.delete_to_start()
            }
            (KeyCode::Char('w'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.delete_word_backward()
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert(&c.to_string())
            }
            (KeyCode::Backspace, _) => self.delete_backward(),
            (KeyCode::Delete, _) => self.delete_forward(),
            (KeyCode::Left, _) => {
                let to = match (self.selection(), shift) {
                    (Some((start, _)), false) => start,
                    _ => self.cursor.saturating_sub(1),
                };
                self.move_to(to, shift);
                Command::none()
            }
            (KeyCode::Right, _) => {
                let to = match (self.selection(), shift) {
                    (Some((_, end)), false) => end,
                    _ => self.cursor + 1,
                };
                self.move_to(to, shift);
                Command::none()
            }
            (KeyCode::Home, _) => {
                self.move_to(0, shift);
                Command::none()
            }
            (KeyCode::End, _) => {
                self.move_to(self.value.len(), shift);
                Command::none()
            }
            _ => Command::none(),
        }
    }
}

impl Component for SearchField {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => {
                if !self.focus {
                    return Command::none();
                }
                self.handle_key(key)
            }
            Message::Paste(text) => {
                if !self.focus {
                    return Command::none();
                }
                self.insert(&text)
            }
            Message::Changed(_) | Message::EditEnded(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        if !self.prompt.is_empty() {
            spans.push(Span::styled(self.prompt.clone(), self.style.prompt));
        }

        if self.value.is_empty() {
            if self.focus {
                spans.push(Span::styled(" ", self.style.cursor));
            }
            spans.push(Span::styled(self.placeholder.clone(), self.style.placeholder));
            frame.render_widget(Paragraph::new(Line::from(spans)), area);
            return;
        }

        // Scroll horizontally, in display columns, so the cursor cell stays
        // visible.
        let available = (area.width as usize)
            .saturating_sub(self.prompt.width())
            .max(1);
        let cell = |pos: usize| self.value.get(pos).map_or(1, |c| c.width().unwrap_or(0));
        let mut offset = self.cursor;
        let mut used = cell(offset);
        while offset > 0 && used + cell(offset - 1) <= available {
            offset -= 1;
            used += cell(offset);
        }
        let selection = self.selection();

        let mut used = 0;
        for pos in offset..=self.value.len() {
            let at_cursor = self.focus && pos == self.cursor;
            let ch = match self.value.get(pos) {
                Some(&c) => c,
                None if at_cursor => ' ',
                None => break,
            };
            let width = ch.width().unwrap_or(0);
            if used + width > available {
                break;
            }
            used += width;
            let style = if at_cursor {
                self.style.cursor
            } else if matches!(selection, Some((start, stop)) if pos >= start && pos < stop) {
                self.style.selection
            } else {
                self.style.text
            };
            spans.push(Span::styled(ch.to_string(), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
