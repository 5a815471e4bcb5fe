//! Lazily-compiled static regex patterns.

/// Declare a module-private function that returns `&'static regex::Regex`,
/// compiled on first access and cached in a `OnceLock`.
///
/// The calling module must have `use regex::Regex;` in scope.
///
/// # Panics
///
/// Panics on first call if `$pattern` is not a valid regex. The message
/// names the pattern.
macro_rules! static_regex {
    (fn $fname:ident, $pattern:expr) => {
        fn $fname() -> &'static Regex {
            static STORE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
            STORE.get_or_init(|| {
                Regex::new($pattern).expect(concat!("BUG: invalid static regex: ", $pattern))
            })
        }
    };
}
pub(crate) use static_regex;
