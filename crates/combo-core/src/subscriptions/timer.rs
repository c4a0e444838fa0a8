use crate::subscription::{SubscriptionId, SubscriptionSource};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::borrow::Cow;
use std::time::{Duration, Instant};

/// A repeating timer that fires at a fixed interval.
///
/// Each tick emits the current [`Instant`]. The `id` string keeps several
/// timers apart when diffing, so widgets that can appear more than once give
/// each instance its own.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use combo_core::{subscribe, Every};
///
/// let sub = subscribe(Every::new(Duration::from_millis(16), "dropdown-fade"))
///     .map(|_| Message::FadeTick);
/// ```
pub struct Every {
    /// The interval between ticks.
    pub interval: Duration,
    /// A string identifier used to distinguish this timer from others.
    pub id: Cow<'static, str>,
}

impl Every {
    /// Create a new repeating timer with the given interval and identifier.
    pub fn new(interval: Duration, id: impl Into<Cow<'static, str>>) -> Self {
        Self {
            interval,
            id: id.into(),
        }
    }
}

impl SubscriptionSource for Every {
    type Output = Instant;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::with_str::<Self>(&self.id)
    }

    fn stream(self) -> BoxStream<'static, Instant> {
        // The interval is built on first poll, so declaring the subscription
        // does not need a running reactor.
        let period = self.interval;
        let stream = futures::stream::once(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            tokio_stream::wrappers::IntervalStream::new(interval)
        })
        .flatten()
        .map(|tick| tick.into_std());
        Box::pin(stream)
    }
}
