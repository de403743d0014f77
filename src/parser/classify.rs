use crate::record::Contact;

/// Kind of a single line inside a contact block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Email,
    Website,
    Phone,
    Address,
    Empty,
}

/// A contact line as it appears on a detail page: its text and, when the line
/// wraps a link, the link target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactLine {
    pub text: String,
    pub href: Option<String>,
}

impl ContactLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: None,
        }
    }

    pub fn with_href(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: Some(href.into()),
        }
    }
}

pub fn classify(text: &str) -> ContactField {
    classify_with_href(text, None)
}

/// First matching rule wins: empty, `@`, web link, digits-only, address.
pub fn classify_with_href(text: &str, href: Option<&str>) -> ContactField {
    let text = text.trim();
    if text.is_empty() {
        return ContactField::Empty;
    }
    if text.contains('@') {
        return ContactField::Email;
    }
    if starts_with_http(text) || href.is_some_and(is_web_href) {
        return ContactField::Website;
    }
    if is_phone_like(text) {
        return ContactField::Phone;
    }
    ContactField::Address
}

fn starts_with_http(s: &str) -> bool {
    s.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("http"))
}

fn is_web_href(href: &str) -> bool {
    let href = href.trim().to_ascii_lowercase();
    !href.is_empty() && !href.starts_with("mailto:") && !href.starts_with("tel:")
}

fn is_phone_like(s: &str) -> bool {
    let mut digits = s.chars().filter(|c| *c != ' ' && *c != '+').peekable();
    digits.peek().is_some() && digits.all(|c| c.is_ascii_digit())
}

impl Contact {
    /// Build from a contact block. A later line of the same kind replaces an
    /// earlier one.
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a ContactLine>,
    {
        let mut contact = Contact::default();
        for line in lines {
            let text = line.text.trim();
            let slot = match classify_with_href(text, line.href.as_deref()) {
                ContactField::Email => &mut contact.email,
                ContactField::Website => &mut contact.website,
                ContactField::Phone => &mut contact.phone,
                ContactField::Address => &mut contact.address,
                ContactField::Empty => continue,
            };
            *slot = text.to_string();
        }
        contact
    }
}
