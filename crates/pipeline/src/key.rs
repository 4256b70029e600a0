/// Collapse a volunteer's name into the canonical lookup key: lowercase
/// `first + last` with every character outside `[a-z0-9]` stripped.
///
/// The key deliberately conflates spelling variants: "Jo-Ann O'Neil" and
/// "joann oneil" produce the same key, and so do two different people whose
/// names differ only in punctuation. Non-ASCII letters are stripped rather
/// than folded; no locale awareness.
pub fn normalize_key(first: &str, last: &str) -> String {
    first
        .chars()
        .chain(last.chars())
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
