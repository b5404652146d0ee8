//! Free-text search terms used by listing filters.

use std::fmt;

/// A trimmed, non-empty search term.
///
/// Adapters turn it into a case-insensitive partial match. Wildcard
/// characters typed by a user are matched literally.
///
/// # Examples
/// ```
/// use companion_backend::domain::SearchTerm;
///
/// let term = SearchTerm::new("  50%_off ").expect("non-blank term");
/// assert_eq!(term.as_str(), "50%_off");
/// assert_eq!(term.like_pattern(), "%50\\%\\_off%");
/// assert!(SearchTerm::new("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Trim the raw input; blank input yields `None`.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    /// The trimmed term.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// `LIKE` pattern matching the term anywhere in a value.
    ///
    /// Escapes `\`, `%` and `_` with the default PostgreSQL escape character.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for ch in self.0.chars() {
            if matches!(ch, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
