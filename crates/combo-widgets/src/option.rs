//! Selectable options and the normalized *term* used to compare them.

/// Trait for types that can be offered by a [`Combobox`](crate::combobox::Combobox)
/// or a [`Dropdown`](crate::dropdown::Dropdown).
///
/// Only the display label is required. Filtering and selection matching never
/// look at anything else, so two options with the same label (ignoring case
/// and surrounding whitespace) are interchangeable as far as the widget is
/// concerned.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone)]
/// struct Country { name: String, code: &'static str }
///
/// impl Item for Country {
///     fn label(&self) -> &str {
///         &self.name
///     }
/// }
/// ```
pub trait Item: Clone + Send + 'static {
    /// Text shown in the list and used for matching.
    fn label(&self) -> &str;
}

impl Item for String {
    fn label(&self) -> &str {
        self
    }
}

impl Item for &'static str {
    fn label(&self) -> &str {
        self
    }
}

/// A label with an attached payload, for callers that need more than text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionData<P> {
    /// Display text.
    pub label: String,
    /// Caller-defined data carried alongside the label.
    pub payload: P,
}

impl<P> OptionData<P> {
    /// Create an option from a label and payload.
    pub fn new(label: impl Into<String>, payload: P) -> Self {
        Self {
            label: label.into(),
            payload,
        }
    }
}

impl<P: Clone + Send + 'static> Item for OptionData<P> {
    fn label(&self) -> &str {
        &self.label
    }
}

/// Normalize text for matching: lowercased, then trimmed.
pub fn term(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

/// Index of the first option whose term equals `wanted` (already normalized).
pub fn position_of<I: Item>(options: &[I], wanted: &str) -> Option<usize> {
    options.iter().position(|option| term(option.label()) == wanted)
}
