//! **combo** -- a searchable dropdown widget for [`ratatui`] applications.
//!
//! This is the umbrella crate that re-exports everything needed to host a
//! combobox from a single dependency:
//!
//! ```toml
//! [dependencies]
//! combo = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`combo_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Subscription`], [`Program`],
//!   [`run`], [`run_with`], etc.).
//! * The [`widgets`] module re-exports everything from [`combo_widgets`]
//!   ([`Combobox`](widgets::Combobox), [`Dropdown`](widgets::Dropdown),
//!   [`SearchField`](widgets::SearchField), and their building blocks).
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use combo::widgets::combobox::{self, Combobox};
//! use combo::{terminal_events, Command, Component, Model, Subscription};
//! use ratatui::Frame;
//!
//! struct App { fruit: Combobox<&'static str> }
//!
//! enum Msg { Fruit(combobox::Message) }
//!
//! impl Model for App {
//!     type Message = Msg;
//!     type Flags = ();
//!
//!     fn init(_: ()) -> (Self, Command<Msg>) {
//!         let fruit = Combobox::new(vec!["Apple", "Banana", "Avocado"]);
//!         (App { fruit }, Command::none())
//!     }
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             Msg::Fruit(m) => self.fruit.update(m).map(Msg::Fruit),
//!         }
//!     }
//!     fn view(&self, frame: &mut Frame) {
//!         self.fruit.view(frame, frame.area());
//!     }
//!     fn subscriptions(&self) -> Vec<Subscription<Msg>> {
//!         vec![terminal_events(|ev| combobox::Message::from_event(&ev).map(Msg::Fruit))]
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     combo::run::<App>(()).await.unwrap();
//! }
//! ```

pub use combo_core::*;
pub mod widgets {
    pub use combo_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
