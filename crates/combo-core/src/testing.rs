//! Headless harnesses for driving models and components in plain `#[test]`
//! functions, with no terminal and no tokio runtime.
//!
//! Synchronous messages produced by commands ([`Command::message`], batches)
//! are queued and fed back through `update` when drained. Futures and quit
//! requests are ignored, except that a quit is recorded on [`TestProgram`].

use crate::command::{Action, Command, CommandInner};
use crate::component::Component;
use crate::model::Model;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::collections::VecDeque;

/// Drives a [`Model`] through init/update/view without a terminal.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<Picker>::new(());
/// prog.send(Msg::Fruit(combobox::Message::Focus));
/// prog.drain_messages();
/// assert!(prog.render_string(40, 10).contains("Avocado"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending: VecDeque<M::Message>,
    quit_requested: bool,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    /// Messages produced by `init` are queued, not yet processed.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending: VecDeque::new(),
            quit_requested: false,
        };
        program.collect(init_cmd);
        program
    }

    /// Run one update cycle with `msg`. Follow-up messages are queued.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Process queued messages, in order, until none are left.
    pub fn drain_messages(&mut self) {
        while let Some(msg) = self.pending.pop_front() {
            let cmd = self.model.update(msg);
            self.collect(cmd);
        }
    }

    /// Send a message and drain everything it produces.
    pub fn send_and_drain(&mut self, msg: M::Message) {
        self.send(msg);
        self.drain_messages();
    }

    /// Whether any processed command asked the program to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable reference to the model for direct test setup.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render the model to a buffer of the given size.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        render_with(width, height, |frame| self.model.view(frame))
    }

    /// Render the model and return the screen as text, one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => self.pending.push_back(msg),
            CommandInner::Action(Action::Quit) => self.quit_requested = true,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
            // Async work can't run without a runtime.
            CommandInner::Future(_) => {}
        }
    }
}

/// Drives a single [`Component`] the way a parent model would.
///
/// [`send`](ComponentHarness::send) runs the update and then feeds every
/// synchronous follow-up message back into the component until it settles.
/// Each processed message (the original one included) is recorded, so tests can
/// assert on what the component reported to its parent.
pub struct ComponentHarness<C: Component> {
    component: C,
    log: Vec<C::Message>,
}

impl<C: Component> ComponentHarness<C>
where
    C::Message: Clone,
{
    /// Wrap a component.
    pub fn new(component: C) -> Self {
        Self {
            component,
            log: Vec::new(),
        }
    }

    /// Deliver `msg` and all the messages it produces, in order.
    pub fn send(&mut self, msg: C::Message) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            self.log.push(msg.clone());
            let cmd = self.component.update(msg);
            queue.extend(cmd.into_messages());
        }
    }

    /// Every message processed so far, oldest first.
    pub fn log(&self) -> &[C::Message] {
        &self.log
    }

    /// Take the recorded messages, leaving the log empty.
    pub fn take_log(&mut self) -> Vec<C::Message> {
        std::mem::take(&mut self.log)
    }

    /// Shared reference to the component.
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Mutable reference to the component, bypassing the message cycle.
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Render the component into `area` of a `width` x `height` screen.
    pub fn render(&self, width: u16, height: u16, area: Rect) -> Buffer {
        render_with(width, height, |frame| self.component.view(frame, area))
    }

    /// Render into `area` and return the screen as text.
    pub fn render_string(&self, width: u16, height: u16, area: Rect) -> String {
        buffer_to_string(&self.render(width, height, area))
    }
}

fn render_with(width: u16, height: u16, draw: impl FnOnce(&mut ratatui::Frame)) -> Buffer {
    let backend = ratatui::backend::TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test backend never fails");
    terminal.draw(draw).expect("test backend never fails");
    terminal.backend().buffer().clone()
}

/// Concatenate a buffer's cells into text. Rows are separated by newlines and
/// keep their trailing spaces.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}
