//! Log sanitization utilities for masking sensitive data.
//!
//! User emails are personal data; only a masked form goes into the logs.

const VISIBLE_CHARS: usize = 3;

/// Mask an email address for safe logging.
///
/// Keeps at most the first three characters of the local part, then
/// asterisks and the domain. Works on characters, not bytes, so non-ASCII
/// addresses are safe to pass in.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_email("user@example.com"), "use***@example.com");
/// assert_eq!(mask_email("ab@test.org"), "ab***@test.org");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => format!("{}***@{}", visible_prefix(local), domain),
        None => format!("{}***", visible_prefix(email)),
    }
}

fn visible_prefix(value: &str) -> String {
    value.chars().take(VISIBLE_CHARS).collect()
}
