use crate::event::TerminalEvent;
use crate::subscription::{Subscription, SubscriptionId};
use crossterm::event::EventStream;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Marker type giving the terminal subscription a stable identity.
pub struct TerminalEvents;

/// Create a terminal events subscription that maps each event through `map`.
///
/// `map` returns `Some(Msg)` to forward the event or `None` to drop it. The
/// id is a singleton, so re-declaring it every update keeps one reader alive.
///
/// # Example
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|event| Some(Msg::Terminal(event)))]
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let map = Arc::new(map);

    // The EventStream is created inside the task: building one eagerly on
    // every subscriptions() call would poke crossterm's global reader and
    // starve the stream that is already running.
    Subscription {
        id: SubscriptionId::of::<TerminalEvents>(),
        spawn: Box::new(move |tx: mpsc::UnboundedSender<Msg>| -> AbortHandle {
            let handle = tokio::spawn(async move {
                let mut events = EventStream::new();
                while let Some(result) = events.next().await {
                    let Ok(event) = result else { continue };
                    if let Some(msg) = map(TerminalEvent::from(event)) {
                        if tx.send(msg).is_err() {
                            break;
                        }
                    }
                }
            });
            handle.abort_handle()
        }),
    }
}
