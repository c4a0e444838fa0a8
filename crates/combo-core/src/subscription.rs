use futures::stream::BoxStream;
use futures::StreamExt;
use std::any::TypeId;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// A long-lived event source managed by the runtime.
///
/// Subscriptions are declared from [`Model::subscriptions`](crate::Model::subscriptions)
/// after every update. The runtime diffs them by [`SubscriptionId`]: new ids
/// are started, missing ids are aborted, unchanged ids keep running. A dropdown
/// that is fading in returns a timer subscription only while the fade runs.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) spawn: Box<dyn FnOnce(mpsc::UnboundedSender<Msg>) -> AbortHandle + Send>,
}

/// Identity for diffing subscriptions between update cycles: a Rust
/// [`TypeId`] plus a numeric discriminant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    type_id: TypeId,
    discriminant: u64,
}

impl SubscriptionId {
    /// Create an ID from a type alone (for singletons).
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant: 0,
        }
    }

    /// Create an ID from a type and a string discriminant.
    pub fn with_str<T: 'static>(s: &str) -> Self {
        let mut hasher = std::hash::DefaultHasher::new();
        s.hash(&mut hasher);
        Self {
            type_id: TypeId::of::<T>(),
            discriminant: hasher.finish(),
        }
    }
}

/// Trait for types that produce a stream of values.
///
/// The runtime calls [`stream`](SubscriptionSource::stream) once when the
/// subscription starts and drops the stream when it is removed.
pub trait SubscriptionSource: Send + 'static {
    /// The type of values this source emits.
    type Output: Send + 'static;

    /// Unique ID for this subscription instance.
    fn id(&self) -> SubscriptionId;

    /// Create the stream of values.
    fn stream(self) -> BoxStream<'static, Self::Output>;
}

/// Create a [`Subscription`] from a [`SubscriptionSource`].
pub fn subscribe<S: SubscriptionSource>(source: S) -> Subscription<S::Output> {
    let id = source.id();
    Subscription::from_stream(id, source.stream())
}

impl<Msg: Send + 'static> Subscription<Msg> {
    /// Create from a raw stream and id.
    pub fn from_stream(id: SubscriptionId, stream: BoxStream<'static, Msg>) -> Self {
        Subscription {
            id,
            spawn: Box::new(move |tx| {
                let handle = tokio::spawn(forward(stream, tx));
                handle.abort_handle()
            }),
        }
    }

    /// The identity used for diffing.
    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Subscription<NewMsg> {
        let f = Arc::new(f);
        Subscription {
            id: self.id,
            spawn: Box::new(move |new_tx: mpsc::UnboundedSender<NewMsg>| {
                let (inner_tx, mut inner_rx) = mpsc::unbounded_channel::<Msg>();
                let abort = (self.spawn)(inner_tx);

                // Ends on its own once the source is aborted and inner_tx drops.
                tokio::spawn(async move {
                    while let Some(msg) = inner_rx.recv().await {
                        if new_tx.send(f(msg)).is_err() {
                            break;
                        }
                    }
                });

                abort
            }),
        }
    }
}

async fn forward<Msg: Send + 'static>(
    mut stream: BoxStream<'static, Msg>,
    tx: mpsc::UnboundedSender<Msg>,
) {
    while let Some(msg) = stream.next().await {
        if tx.send(msg).is_err() {
            break;
        }
    }
}

/// Keeps the running subscriptions in sync with what the model declares.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    active: HashMap<SubscriptionId, AbortHandle>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            active: HashMap::new(),
            msg_tx,
        }
    }

    pub fn reconcile(&mut self, declared: Vec<Subscription<Msg>>) {
        let mut declared: HashMap<SubscriptionId, Subscription<Msg>> = declared
            .into_iter()
            .map(|sub| (sub.id.clone(), sub))
            .collect();

        self.active.retain(|id, handle| {
            let keep = declared.contains_key(id);
            if !keep {
                tracing::trace!(?id, "stopping subscription");
                handle.abort();
            }
            keep
        });

        for (id, sub) in declared.drain() {
            if !self.active.contains_key(&id) {
                tracing::trace!(?id, "starting subscription");
                let handle = (sub.spawn)(self.msg_tx.clone());
                self.active.insert(id, handle);
            }
        }
    }

    pub fn shutdown(&mut self) {
        for (_, handle) in self.active.drain() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
