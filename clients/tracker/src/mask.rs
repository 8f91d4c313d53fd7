const FULLY_MASKED: &str = "***@***.com";
const MASKED_BARE_DOMAIN: &str = "d***.com";

fn first_char(s: &str) -> &str {
    s.chars().next().map_or("", |c| &s[..c.len_utf8()])
}

/// Irreversibly obfuscates an email address, keeping only the first
/// character of the local part, the first character of the domain and the
/// top-level label.
pub fn mask_email(email: &str) -> String {
    if email.is_empty() {
        return String::new();
    }

    let parts: Vec<&str> = email.split('@').collect();
    let [local, domain] = parts.as_slice() else {
        return FULLY_MASKED.to_string();
    };

    let labels: Vec<&str> = domain.split('.').collect();
    let masked_domain = match labels.as_slice() {
        [first, .., last] => format!("{}***.{}", first_char(first), last),
        _ => MASKED_BARE_DOMAIN.to_string(),
    };

    format!("{}***@{}", first_char(local), masked_domain)
}
