use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_DIGIT: Regex = Regex::new(r"[^0-9]").unwrap();
}

/// Digits of an agent phone number, punctuation stripped.
pub fn phone_digits(phone: &str) -> String {
    NON_DIGIT.replace_all(phone, "").into_owned()
}

/// WhatsApp deep link for an agent phone number.
pub fn whatsapp_link(phone: &str) -> String {
    format!("https://wa.me/{}", phone_digits(phone))
}

/// `tel:` link keeping the number as stored.
pub fn phone_link(phone: &str) -> String {
    format!("tel:{}", phone)
}

/// `mailto:` link for the agent address. Contact addresses are per-record
/// data; nothing here assumes a particular domain.
pub fn email_link(email: &str) -> String {
    format!("mailto:{}", email)
}
