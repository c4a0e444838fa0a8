//! Widgets for the **combo** searchable dropdown.
//!
//! Every widget in this crate implements [`combo_core::Component`], so it can be
//! embedded inside any [`combo_core::Model`] and placed anywhere in a
//! [`ratatui`] layout.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`combobox`] | Searchable dropdown: trigger row, search field, filtered option list |
//! | [`dropdown`] | Option list overlay with a silent active index and fade transition |
//! | [`search_field`] | Single-line search field with a selection range |
//!
//! # Building blocks
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`option`] | The [`Item`](option::Item) trait and label normalization |
//! | [`filter`] | Order-preserving substring filter |
//! | [`store`] | [`OptionStore`](store::OptionStore): full list and selected index per session |

pub mod combobox;
pub mod dropdown;
pub mod filter;
pub mod option;
pub mod search_field;
pub mod store;

pub use combobox::{Combobox, ComboboxStyle};
pub use dropdown::{Dropdown, DropdownStyle};
pub use option::{Item, OptionData};
pub use search_field::{SearchField, SearchFieldStyle};
pub use store::OptionStore;
