//! Core runtime for the **combo** searchable dropdown.
//!
//! `combo-core` is the host framework the combobox lives in: a small
//! [Elm Architecture] runtime on top of [`ratatui`] and [`crossterm`]. State
//! changes happen only in `update`, one message at a time, and side effects
//! are described by [`Command`]s and [`Subscription`]s.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Side effect to be executed by the runtime |
//! | [`Subscription`] | Long-lived event source (terminal events, timers) |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for a [`Model`] |
//! | [`ComponentHarness`](testing::ComponentHarness) | Headless harness for a [`Component`] |
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{log_to_file, OutputTarget, Program, ProgramError, ProgramOptions};
pub use subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
pub use subscriptions::{terminal_events, Every};

/// Run a combo application with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
