//! Utility functions for SQLite storage operations.

/// Escape character paired with [`contains_pattern`] in `LIKE ... ESCAPE`.
pub const LIKE_ESCAPE: char = '\\';

/// Builds a `LIKE` pattern matching values that contain `fragment` literally.
///
/// `%`, `_` and the escape character itself are escaped, so user input never
/// acts as a wildcard. Use together with `.escape(LIKE_ESCAPE)`.
///
/// # Example
///
/// ```ignore
/// events::name.like(contains_pattern("50%_off")).escape(LIKE_ESCAPE)
/// ```
pub fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
