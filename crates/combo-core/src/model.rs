use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait, following the [Elm Architecture].
///
/// The runtime drives an **init -> update -> view** cycle:
///
/// 1. [`init`](Model::init) builds the initial state and may return a
///    [`Command`].
/// 2. [`view`](Model::view) renders the state to a [`ratatui::Frame`].
/// 3. Events arrive as messages through [`Subscription`]s or
///    [`Command::message`].
/// 4. [`update`](Model::update) handles one message at a time. Updates never
///    overlap, so widget state needs no locking.
///
/// [Elm Architecture]: https://guide.elm-lang.org/architecture/
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Initialization data passed to [`Model::init`]. Use `()` when none is needed.
    type Flags: Send + 'static;

    /// Create the initial model state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process a message, mutate state, and return a command for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state. Called after every update.
    fn view(&self, frame: &mut Frame);

    /// Declare active subscriptions. Called after every update; the runtime
    /// starts new ones and cancels the ones no longer returned.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
