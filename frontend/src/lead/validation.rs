// Same deny-list as backend/src/utils/validation.rs, whose tests fail when the
// two drift apart. The server check is authoritative.
const FREE_MAIL_DOMAINS: &[&str] = &[
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

pub fn is_business_email(value: &str) -> bool {
    if value.is_empty() || !value.contains('@') {
        return false;
    }
    let lowered = value.to_lowercase();
    let domain = lowered.split('@').nth(1).unwrap_or("");
    !FREE_MAIL_DOMAINS.contains(&domain)
}
