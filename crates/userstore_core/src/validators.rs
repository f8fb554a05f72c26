//! Input validators shared by core use-cases.

use once_cell::sync::Lazy;
use regex::Regex;

const MIN_EMAIL_LEN: usize = 3;
const MAX_EMAIL_LEN: usize = 254;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,4}$").expect("valid email regex")
});

/// Returns whether `candidate` is a well-formed, lowercase email address.
///
/// Length is counted in bytes and must be within `3..=254`. Matching is
/// case-sensitive, so `A@B.CO` is rejected.
pub fn is_email_valid(candidate: &str) -> bool {
    if candidate.len() < MIN_EMAIL_LEN || candidate.len() > MAX_EMAIL_LEN {
        return false;
    }
    EMAIL_RE.is_match(candidate)
}
