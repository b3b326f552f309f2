pub mod audit;
pub mod cancellation;
pub mod instructor;
pub mod notification;
pub mod reservation;
pub mod session;
pub mod settings;
pub mod user;

/// `ILIKE` pattern matching `term` anywhere, with `%`, `_` and `\`
/// taken literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
