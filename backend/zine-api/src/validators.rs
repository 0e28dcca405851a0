use once_cell::sync::Lazy;
use regex::Regex;

/// Field shape checks behind registration.

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]{3,32}$").expect("username pattern must parse"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern must parse")
});

/// Handle shape: 3 to 32 characters from letters, digits, `-` and `_`.
pub fn validate_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// Simplified RFC 5322 shape, capped at 254 bytes.
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_RE.is_match(email)
}

/// Eight bytes minimum, mixing an uppercase letter, a lowercase letter,
/// a digit and a character that is none of those.
pub fn validate_password(password: &str) -> bool {
    let mut upper = false;
    let mut lower = false;
    let mut digit = false;
    let mut other = false;
    for c in password.chars() {
        upper |= c.is_uppercase();
        lower |= c.is_lowercase();
        digit |= c.is_ascii_digit();
        other |= !c.is_alphanumeric();
    }
    password.len() >= 8 && upper && lower && digit && other
}
