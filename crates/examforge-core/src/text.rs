use std::sync::LazyLock;

use regex::Regex;

// A single letter A–J or digit 1–4, followed by `.` or `)`, or the same token
// wrapped in parentheses, plus any trailing whitespace.
static LABEL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Ja-j1-4][.)]|\([A-Ja-j1-4]\))\s*").expect("label prefix pattern is valid")
});

/// Strip at most one pre-existing option-label prefix from a raw option string.
///
/// Question banks arrive with inconsistent labels (`A.`, `(a)`, `1)` …); the
/// composer regenerates labels itself, so the old ones have to go. Only the
/// leading match is removed and the rest of the text is untouched.
pub fn clean_option_label(raw: &str) -> String {
    LABEL_PREFIX.replace(raw, "").into_owned()
}
