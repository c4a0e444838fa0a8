use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// Every widget in `combo-widgets` is a `Component`. Unlike a
/// [`Model`](crate::Model), its [`view`](Component::view) receives the area to
/// draw into, so the parent decides where the widget lives.
///
/// # Composition pattern
///
/// Wrap the child's message type in one of the parent's variants and lift the
/// child's commands with [`Command::map`]:
///
/// ```rust,ignore
/// use combo_core::{Command, Component, Model};
/// use combo_widgets::combobox::{self, Combobox};
/// use ratatui::Frame;
///
/// struct App { fruit: Combobox<&'static str> }
///
/// enum Msg { Fruit(combobox::Message) }
///
/// impl Model for App {
///     type Message = Msg;
///     type Flags = ();
///
///     fn init(_: ()) -> (Self, Command<Msg>) {
///         let fruit = Combobox::new(vec!["Apple", "Banana", "Avocado"]);
///         (App { fruit }, Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Fruit(m) => self.fruit.update(m).map(Msg::Fruit),
///         }
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         self.fruit.view(frame, frame.area());
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    ///
    /// The returned command uses the component's own `Message` type; the parent
    /// lifts it with [`.map()`](Command::map).
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    ///
    /// Overlays (such as an open dropdown list) may draw just outside `area`,
    /// anchored to it.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Declare active subscriptions for this component.
    ///
    /// The parent collects these and returns them from
    /// [`Model::subscriptions`](crate::Model::subscriptions), mapping messages
    /// appropriately. Defaults to none.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently holds keyboard focus.
    fn focused(&self) -> bool {
        false
    }
}
