//! Substring filtering over an option list.

use crate::option::{term, Item};

/// Options whose term contains the term of `query`, in their original order.
///
/// A query that normalizes to the empty string keeps every option. There is no
/// ranking: the result is always an order-preserving subsequence of `options`,
/// and `options` itself is left untouched.
///
/// ```ignore
/// let fruits = vec!["Apple", "Banana", "Avocado"];
/// assert_eq!(filter(&fruits, "AV "), vec!["Avocado"]);
/// ```
pub fn filter<I: Item>(options: &[I], query: &str) -> Vec<I> {
    let needle = term(query);
    if needle.is_empty() {
        return options.to_vec();
    }
    options
        .iter()
        .filter(|option| term(option.label()).contains(&needle))
        .cloned()
        .collect()
}
