//! Query options accumulated by a collection node and their rendering.
//!
//! A collection renders in one of two modes:
//!
//! - **Collection mode** (no key selected): `Name` followed, when any
//!   modifier is set, by `?&$top=N&$skip=N&$select=S&expand=E&filter=F`.
//!   Only set modifiers are emitted, always in that order, each preceded by
//!   `&`. Note that `expand` and `filter` carry no `$` prefix.
//! - **Keyed mode**: `Name('key')`. Modifiers are retained but not emitted.
//!
//! # Example
//!
//! ```rust
//! use odata_client::odata::QueryOptions;
//!
//! let options = QueryOptions {
//!     top: Some(10),
//!     skip: Some(5),
//!     select: Some("Id,Subject".to_string()),
//!     ..QueryOptions::default()
//! };
//!
//! assert_eq!(options.to_query_string(), "?&$top=10&$skip=5&$select=Id,Subject");
//! ```

use std::fmt::Write;

/// The modifiers and key selection of a collection node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Maximum number of results.
    pub top: Option<u32>,
    /// Number of results to skip.
    pub skip: Option<u32>,
    /// Comma-separated projection.
    pub select: Option<String>,
    /// Related entities to inline.
    pub expand: Option<String>,
    /// Filter expression.
    pub filter: Option<String>,
    /// The key of the single element this collection was narrowed to.
    pub selected_key: Option<String>,
}

impl QueryOptions {
    /// Returns `true` once a key has been selected.
    #[must_use]
    pub const fn is_single_item(&self) -> bool {
        self.selected_key.is_some()
    }

    /// Returns `true` if any collection modifier is set.
    #[must_use]
    pub const fn has_modifiers(&self) -> bool {
        self.top.is_some()
            || self.skip.is_some()
            || self.select.is_some()
            || self.expand.is_some()
            || self.filter.is_some()
    }

    /// Renders the collection-mode query string.
    ///
    /// Returns an empty string when no modifier is set.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        if !self.has_modifiers() {
            return String::new();
        }

        let mut query = String::from("?");
        if let Some(top) = self.top {
            let _ = write!(query, "&$top={top}");
        }
        if let Some(skip) = self.skip {
            let _ = write!(query, "&$skip={skip}");
        }
        if let Some(select) = &self.select {
            let _ = write!(query, "&$select={select}");
        }
        if let Some(expand) = &self.expand {
            let _ = write!(query, "&expand={expand}");
        }
        if let Some(filter) = &self.filter {
            let _ = write!(query, "&filter={filter}");
        }
        query
    }

    /// Renders the keyed-mode selector `('key')`, or `None` in collection mode.
    ///
    /// Single quotes inside the key are doubled as OData literals require,
    /// and the result is percent-encoded for use in a URL path.
    #[must_use]
    pub fn key_selector(&self) -> Option<String> {
        self.selected_key.as_deref().map(|key| {
            let literal = key.replace('\'', "''");
            format!("('{}')", urlencoding::encode(&literal))
        })
    }
}

/// Treats an empty modifier value as unset.
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_modifiers_renders_nothing() {
        let options = QueryOptions::default();
        assert_eq!(options.to_query_string(), "");
        assert!(!options.has_modifiers());
    }

    #[test]
    fn test_every_subset_renders_in_fixed_order() {
        const PARTS: [&str; 5] = [
            "&$top=3",
            "&$skip=4",
            "&$select=Id",
            "&expand=Attachments",
            "&filter=IsRead eq false",
        ];

        for mask in 0u8..32 {
            let set = |bit: u8| mask & (1 << bit) != 0;
            let options = QueryOptions {
                top: set(0).then_some(3),
                skip: set(1).then_some(4),
                select: set(2).then(|| "Id".to_string()),
                expand: set(3).then(|| "Attachments".to_string()),
                filter: set(4).then(|| "IsRead eq false".to_string()),
                selected_key: None,
            };

            let expected: String = PARTS
                .iter()
                .enumerate()
                .filter(|(bit, _)| set(u8::try_from(*bit).unwrap()))
                .map(|(_, part)| *part)
                .collect();
            let expected = if expected.is_empty() {
                expected
            } else {
                format!("?{expected}")
            };

            assert_eq!(options.to_query_string(), expected, "mask {mask:05b}");
        }
    }

    #[test]
    fn test_key_selector_quotes_and_encodes() {
        let mut options = QueryOptions::default();
        assert_eq!(options.key_selector(), None);

        options.selected_key = Some("Inbox".to_string());
        assert_eq!(options.key_selector().as_deref(), Some("('Inbox')"));

        options.selected_key = Some("AAMk/a+b=".to_string());
        assert_eq!(
            options.key_selector().as_deref(),
            Some("('AAMk%2Fa%2Bb%3D')")
        );

        options.selected_key = Some("O'Brien".to_string());
        assert_eq!(options.key_selector().as_deref(), Some("('O%27%27Brien')"));
    }

    #[test]
    fn test_non_empty_discards_blank_values() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty("Id".to_string()), Some("Id".to_string()));
    }
}
