use std::sync::LazyLock;

use regex::Regex;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Padiglione\s+(\d+(?:\s*-\s*\d+)?)\s*-\s*Stand\s+([A-Za-z])\s*(\d+)").unwrap()
});
static PAVILION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Padiglione\s+(\d+(?:\s*-\s*\d+)?)").unwrap());
static STAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Stand\s+([A-Za-z])\s*(\d+)\b").unwrap());

/// Pavilion and stand parsed out of a `Padiglione .. - Stand ..` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub pavilion: String,
    pub stand: String,
}

pub fn is_marker(line: &str) -> bool {
    MARKER_RE.is_match(line)
}

pub fn parse_marker(line: &str) -> Option<Marker> {
    let caps = MARKER_RE.captures(line)?;
    Some(Marker {
        pavilion: squash_range(&caps[1]),
        stand: format_stand(&caps[2], &caps[3]),
    })
}

/// Search anywhere in `text` for a pavilion and a stand; either may be empty.
pub fn parse_location(text: &str) -> (String, String) {
    if let Some(m) = parse_marker(text) {
        return (m.pavilion, m.stand);
    }
    let pavilion = PAVILION_RE
        .captures(text)
        .map(|c| squash_range(&c[1]))
        .unwrap_or_default();
    let stand = STAND_RE
        .captures(text)
        .map(|c| format_stand(&c[1], &c[2]))
        .unwrap_or_default();
    (pavilion, stand)
}

fn squash_range(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

fn format_stand(letter: &str, digits: &str) -> String {
    format!("{} {}", letter.to_uppercase(), digits)
}
