use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// A side effect returned from [`Model::update`](crate::Model::update),
/// [`Model::init`](crate::Model::init) or
/// [`Component::update`](crate::Component::update).
///
/// Widgets use commands mostly to report what happened to their parent: the
/// combobox answers a key press with `Command::message(Message::Selected(..))`
/// and the parent routes that message back down on the next cycle. The runtime
/// also understands async work and program exit.
///
/// # Examples
///
/// ```rust,ignore
/// // Nothing to report:
/// let cmd = Command::none();
///
/// // Report a pick to the parent:
/// let cmd = Command::message(Message::Selected(2, "Avocado".into()));
///
/// // Leave the event loop:
/// let cmd = Command::quit();
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Action(Action<Msg>),
    Future(BoxFuture<'static, Msg>),
    Batch(Vec<Command<Msg>>),
}

/// Actions the runtime handles synchronously, without spawning a task.
pub enum Action<Msg> {
    /// Deliver a message on the next update cycle.
    Message(Msg),
    /// Quit the program.
    Quit,
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Run an async future, map the result to a message.
    pub fn perform<F, T>(future: F, map: impl FnOnce(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Command {
            inner: CommandInner::Future(Box::pin(async move { map(future.await) })),
        }
    }

    /// Send a message immediately.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Action(Action::Message(msg)),
        }
    }

    /// Quit the program.
    pub fn quit() -> Self {
        Command {
            inner: CommandInner::Action(Action::Quit),
        }
    }

    /// Combine several commands. Synchronous messages are delivered in the
    /// order given; `none` entries are dropped.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|cmd| !cmd.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.remove(0),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Command<NewMsg> {
        self.map_with(Arc::new(f))
    }

    fn map_with<NewMsg: Send + 'static>(
        self,
        f: Arc<dyn Fn(Msg) -> NewMsg + Send + Sync>,
    ) -> Command<NewMsg> {
        match self.inner {
            CommandInner::None => Command::none(),
            CommandInner::Action(Action::Message(msg)) => Command::message(f(msg)),
            CommandInner::Action(Action::Quit) => Command::quit(),
            CommandInner::Future(fut) => Command {
                inner: CommandInner::Future(Box::pin(async move { f(fut.await) })),
            },
            CommandInner::Batch(cmds) => Command {
                inner: CommandInner::Batch(
                    cmds.into_iter().map(|cmd| cmd.map_with(f.clone())).collect(),
                ),
            },
        }
    }

    // --- Inspection methods (useful for testing) ---

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// Returns `true` if this command asks the program to quit.
    pub fn is_quit(&self) -> bool {
        matches!(self.inner, CommandInner::Action(Action::Quit))
    }

    /// If this command is an immediate message action, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Action(Action::Message(msg)) => Some(msg),
            _ => None,
        }
    }

    /// Flatten every synchronous message in this command, in delivery order.
    ///
    /// Futures are dropped unpolled. The headless harnesses in
    /// [`testing`](crate::testing) use this to run update cycles without a
    /// tokio runtime.
    pub fn into_messages(self) -> Vec<Msg> {
        let mut out = Vec::new();
        self.collect_messages(&mut out);
        out
    }

    fn collect_messages(self, out: &mut Vec<Msg>) {
        match self.inner {
            CommandInner::Action(Action::Message(msg)) => out.push(msg),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    cmd.collect_messages(out);
                }
            }
            CommandInner::None | CommandInner::Action(Action::Quit) | CommandInner::Future(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_none_is_none() {
        let cmd: Command<()> = Command::none();
        assert!(cmd.is_none());
    }

    #[test]
    fn command_message_round_trips() {
        let cmd: Command<i32> = Command::message(42);
        assert_eq!(cmd.into_message(), Some(42));
    }

    #[test]
    fn command_quit_is_quit() {
        let cmd: Command<()> = Command::quit();
        assert!(cmd.is_quit());
        assert!(!cmd.is_none());
    }

    #[test]
    fn batch_of_nothing_is_none() {
        let cmd: Command<()> = Command::batch(vec![Command::none(), Command::none()]);
        assert!(cmd.is_none());
    }

    #[test]
    fn batch_of_one_unwraps() {
        let cmd: Command<i32> = Command::batch(vec![Command::none(), Command::message(1)]);
        assert_eq!(cmd.into_message(), Some(1));
    }

    #[test]
    fn batch_keeps_order() {
        let cmd: Command<i32> = Command::batch(vec![
            Command::message(1),
            Command::batch(vec![Command::message(2), Command::message(3)]),
            Command::quit(),
            Command::message(4),
        ]);
        assert_eq!(cmd.into_messages(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn map_message() {
        let cmd: Command<i32> = Command::message(42);
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        assert_eq!(mapped.into_message().as_deref(), Some("42"));
    }

    #[test]
    fn map_quit_stays_quit() {
        let cmd: Command<i32> = Command::quit();
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        assert!(mapped.is_quit());
    }

    #[test]
    fn map_batch() {
        let cmd: Command<i32> = Command::batch(vec![Command::message(1), Command::message(2)]);
        let mapped: Command<String> = cmd.map(|n| format!("#{n}"));
        assert_eq!(mapped.into_messages(), vec!["#1", "#2"]);
    }

    #[tokio::test]
    async fn perform_maps_future_output() {
        let cmd: Command<String> = Command::perform(async { 7 }, |n: i32| n.to_string());
        match cmd.inner {
            CommandInner::Future(fut) => assert_eq!(fut.await, "7"),
            _ => panic!("Expected a future"),
        }
    }
}
