use once_cell::sync::Lazy;
use regex::Regex;

/// Consumer mail providers that do not count as a business address.
pub const FREE_MAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "yahoo.de",
    "outlook.com",
    "hotmail.com",
    "live.com",
    "icloud.com",
    "me.com",
    "gmx.at",
    "gmx.de",
    "web.de",
    "aol.com",
    "proton.me",
    "protonmail.com",
];

// leading + or digit, then at least seven digits/spaces/()/-/
static BUSINESS_MOBILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+0-9][0-9\s()/-]{7,}$").expect("mobile pattern is a valid regex")
});

/// Best-effort business address check. Only the part after the first `@`
/// is compared against the deny-list.
pub fn is_business_email(value: &str) -> bool {
    if value.is_empty() || !value.contains('@') {
        return false;
    }
    let lowered = value.to_lowercase();
    let domain = lowered.split('@').nth(1).unwrap_or("");
    !FREE_MAIL_DOMAINS.contains(&domain)
}

pub fn is_business_mobile(value: &str) -> bool {
    BUSINESS_MOBILE.is_match(value)
}

/// Domain part used in log lines instead of the full address.
pub fn email_domain(value: &str) -> &str {
    value.split('@').nth(1).unwrap_or("")
}
